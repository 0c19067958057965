use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use poise::serenity_prelude::UserId;

use crate::database::BirthdayStore;
use crate::error::BotError;
use crate::schedule::{ReminderSettings, ReminderState};
use crate::utils::datetime::{format_day_month, is_valid_birthday, parse_day_month};

/// A year-less birth date that always exists in a leap year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthDate {
    day: u32,
    month: u32,
}

impl BirthDate {
    /// Build a birth date, rejecting pairs that do not exist in the calendar
    pub fn new(day: u32, month: u32) -> Result<Self, BotError> {
        if !is_valid_birthday(day, month) {
            return Err(BotError::InvalidDateFormat(format_day_month(day, month)));
        }
        Ok(Self { day, month })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl FromStr for BirthDate {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, month) = parse_day_month(s)?;
        Ok(Self { day, month })
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_day_month(self.day, self.month))
    }
}

/// The stored birthday of one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRecord {
    pub user_id: UserId,
    pub date: BirthDate,
}

/// A birthday together with the number of days until its next occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub user_id: UserId,
    pub date: BirthDate,
    pub days_until: i64,
}

/// Bot state shared across all handlers
#[derive(Clone)]
pub struct Data {
    /// Birthday storage, the single source of truth
    pub store: Arc<dyn BirthdayStore>,
    /// Users already reminded, shared with the schedule manager
    pub reminders: Arc<ReminderState>,
    pub settings: ReminderSettings,
}

impl Data {
    /// Create a new Data instance around the given store
    pub fn new(store: Arc<dyn BirthdayStore>, settings: ReminderSettings) -> Self {
        Self {
            store,
            reminders: Arc::new(ReminderState::new()),
            settings,
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_date_new() {
        assert!(BirthDate::new(29, 2).is_ok());
        assert!(BirthDate::new(31, 12).is_ok());

        assert!(BirthDate::new(30, 2).is_err());
        assert!(BirthDate::new(31, 4).is_err());
        assert!(BirthDate::new(0, 1).is_err());
        assert!(BirthDate::new(1, 13).is_err());
    }

    #[test]
    fn test_birth_date_parse_and_display() {
        let date: BirthDate = "05-11".parse().unwrap();
        assert_eq!(date.day(), 5);
        assert_eq!(date.month(), 11);
        assert_eq!(date.to_string(), "05-11");
    }

    #[test]
    fn test_birth_date_parse_rejects_swapped_day_and_month() {
        // 12-25 read as DD-MM would be month 25
        assert!("12-25".parse::<BirthDate>().is_err());
    }
}
