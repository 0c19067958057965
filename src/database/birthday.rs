use super::{BirthdayStore, Database};
use async_trait::async_trait;
use poise::serenity_prelude::UserId;
use sqlx::Error as SqlxError;
use tracing::warn;

use crate::error::BotError;
use crate::models::{BirthDate, BirthdayRecord};

impl Database {
    /// Save or update a user's birthday
    pub async fn upsert_birthday(
        &self,
        user_id: UserId,
        day: i32,
        month: i32,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            INSERT INTO user_birthdays (user_id, birth_day, birth_month, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                birth_day = $2,
                birth_month = $3,
                updated_at = NOW()
            "#,
        )
        .bind(user_id.get() as i64)
        .bind(day)
        .bind(month)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Get a user's birthday as (day, month)
    pub async fn get_birthday(&self, user_id: UserId) -> Result<Option<(i32, i32)>, SqlxError> {
        let result: Option<(i32, i32)> = sqlx::query_as(
            "SELECT birth_day, birth_month FROM user_birthdays WHERE user_id = $1",
        )
        .bind(user_id.get() as i64)
        .fetch_optional(self.pool())
        .await?;

        Ok(result)
    }

    /// Check whether a user has a stored row
    pub async fn has_birthday(&self, user_id: UserId) -> Result<bool, SqlxError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM user_birthdays WHERE user_id = $1)")
                .bind(user_id.get() as i64)
                .fetch_one(self.pool())
                .await?;

        Ok(exists)
    }

    /// Get every stored birthday as (user, day, month)
    pub async fn get_all_birthdays(&self) -> Result<Vec<(UserId, i32, i32)>, SqlxError> {
        let rows: Vec<(i64, i32, i32)> =
            sqlx::query_as("SELECT user_id, birth_day, birth_month FROM user_birthdays")
                .fetch_all(self.pool())
                .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, day, month)| (UserId::new(user_id as u64), day, month))
            .collect())
    }

    /// Remove a user's birthday, returns whether a row was deleted
    pub async fn delete_birthday(&self, user_id: UserId) -> Result<bool, SqlxError> {
        let result = sqlx::query("DELETE FROM user_birthdays WHERE user_id = $1")
            .bind(user_id.get() as i64)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a stored row, skipping rows the calendar cannot represent
fn to_record(user_id: UserId, day: i32, month: i32) -> Option<BirthdayRecord> {
    let date = u32::try_from(day)
        .ok()
        .zip(u32::try_from(month).ok())
        .and_then(|(day, month)| BirthDate::new(day, month).ok());

    match date {
        Some(date) => Some(BirthdayRecord { user_id, date }),
        None => {
            warn!(
                "Ignoring invalid stored birthday {}/{} for user {}",
                day, month, user_id
            );
            None
        }
    }
}

#[async_trait]
impl BirthdayStore for Database {
    async fn upsert(&self, user_id: UserId, date: BirthDate) -> Result<(), BotError> {
        self.upsert_birthday(user_id, date.day() as i32, date.month() as i32)
            .await?;
        Ok(())
    }

    async fn exists(&self, user_id: UserId) -> Result<bool, BotError> {
        Ok(self.has_birthday(user_id).await?)
    }

    async fn get(&self, user_id: UserId) -> Result<Option<BirthdayRecord>, BotError> {
        let row = self.get_birthday(user_id).await?;
        Ok(row.and_then(|(day, month)| to_record(user_id, day, month)))
    }

    async fn list_all(&self) -> Result<Vec<BirthdayRecord>, BotError> {
        let rows = self.get_all_birthdays().await?;
        Ok(rows
            .into_iter()
            .filter_map(|(user_id, day, month)| to_record(user_id, day, month))
            .collect())
    }

    async fn delete(&self, user_id: UserId) -> Result<bool, BotError> {
        Ok(self.delete_birthday(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_record_valid_row() {
        let record = to_record(UserId::new(5), 29, 2).unwrap();
        assert_eq!(record.date.to_string(), "29-02");
    }

    #[test]
    fn test_to_record_skips_impossible_row() {
        // The table CHECKs allow 31 for any month
        assert!(to_record(UserId::new(5), 31, 4).is_none());
        assert!(to_record(UserId::new(5), -1, 4).is_none());
    }
}
