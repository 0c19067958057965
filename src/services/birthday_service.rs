/// Birthday service - business logic behind the `/anniv` commands
use chrono::NaiveDate;
use poise::serenity_prelude::UserId;
use tracing::info;

use crate::database::BirthdayStore;
use crate::error::BotError;
use crate::models::{BirthDate, BirthdayRecord, UpcomingBirthday};
use crate::schedule::ReminderState;
use crate::utils::datetime::days_until;

/// Service for birthday-related operations
///
/// Every mutation clears the user's reminder marks so a changed birthday
/// is eligible for fresh reminders.
pub struct BirthdayService<'a> {
    store: &'a dyn BirthdayStore,
    reminders: &'a ReminderState,
}

impl<'a> BirthdayService<'a> {
    /// Create a new birthday service
    pub fn new(store: &'a dyn BirthdayStore, reminders: &'a ReminderState) -> Self {
        Self { store, reminders }
    }

    /// Add or replace a user's birthday from `DD-MM` input
    pub async fn add(&self, user_id: UserId, input: &str) -> Result<BirthDate, BotError> {
        let date: BirthDate = input.parse()?;

        self.store.upsert(user_id, date).await?;
        self.reminders.clear_user(user_id);

        info!("Saved birthday {} for user {}", date, user_id);
        Ok(date)
    }

    /// Change the birthday of a user that already has one
    ///
    /// Existence is checked on the stored row, so a row that can no longer be
    /// read as a date can still be corrected here.
    pub async fn update(&self, user_id: UserId, input: &str) -> Result<BirthDate, BotError> {
        if !self.store.exists(user_id).await? {
            return Err(BotError::RecordNotFound(user_id));
        }
        let date: BirthDate = input.parse()?;

        self.store.upsert(user_id, date).await?;
        self.reminders.clear_user(user_id);

        info!("Updated birthday of user {} to {}", user_id, date);
        Ok(date)
    }

    /// Remove a user's birthday
    pub async fn delete(&self, user_id: UserId) -> Result<(), BotError> {
        if !self.store.delete(user_id).await? {
            return Err(BotError::RecordNotFound(user_id));
        }
        self.reminders.clear_user(user_id);

        info!("Deleted birthday of user {}", user_id);
        Ok(())
    }

    /// Get a user's birthday
    pub async fn lookup(&self, user_id: UserId) -> Result<BirthdayRecord, BotError> {
        self.store
            .get(user_id)
            .await?
            .ok_or(BotError::RecordNotFound(user_id))
    }

    /// All birthdays, closest first
    pub async fn upcoming(&self, today: NaiveDate) -> Result<Vec<UpcomingBirthday>, BotError> {
        let records = self.store.list_all().await?;
        Ok(sort_by_proximity(records, today))
    }
}

/// Order birthdays by days until their next occurrence
///
/// Ties are broken by user id so the order does not depend on storage.
pub fn sort_by_proximity(records: Vec<BirthdayRecord>, today: NaiveDate) -> Vec<UpcomingBirthday> {
    let mut upcoming: Vec<UpcomingBirthday> = records
        .into_iter()
        .filter_map(|record| {
            days_until(record.date.day(), record.date.month(), today).map(|days_until| {
                UpcomingBirthday {
                    user_id: record.user_id,
                    date: record.date,
                    days_until,
                }
            })
        })
        .collect();

    upcoming.sort_by_key(|birthday| (birthday.days_until, birthday.user_id));
    upcoming
}
