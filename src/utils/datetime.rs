/// Pure date utility functions (Discord-agnostic)
use chrono::{Datelike, NaiveDate};

use crate::constants::{DATE_SEPARATOR, LEAP_REFERENCE_YEAR};
use crate::error::BotError;

/// Check if a given year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    date_exists(year, 2, 29)
}

/// Check if a specific date exists (considering leap years)
pub fn date_exists(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Validate a year-less birthday against a leap year, so 29-02 is allowed
pub fn is_valid_birthday(day: u32, month: u32) -> bool {
    date_exists(LEAP_REFERENCE_YEAR, month, day)
}

/// Parse a `DD-MM` string into `(day, month)`
///
/// Both parts must be exactly two digits and the pair must exist in the
/// calendar. Surrounding whitespace is ignored.
pub fn parse_day_month(input: &str) -> Result<(u32, u32), BotError> {
    let invalid = || BotError::InvalidDateFormat(input.to_string());

    let (day, month) = input.trim().split_once(DATE_SEPARATOR).ok_or_else(invalid)?;
    let day = parse_two_digits(day).ok_or_else(invalid)?;
    let month = parse_two_digits(month).ok_or_else(invalid)?;

    if !is_valid_birthday(day, month) {
        return Err(invalid());
    }

    Ok((day, month))
}

fn parse_two_digits(part: &str) -> Option<u32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Format a day and month as `DD-MM`
pub fn format_day_month(day: u32, month: u32) -> String {
    format!("{:02}{}{:02}", day, DATE_SEPARATOR, month)
}

/// Date on which a birthday is observed in `year`
///
/// A 29-02 birthday is observed on 28-02 in non-leap years. Returns `None`
/// only for pairs that exist in no year at all.
pub fn occurrence_in_year(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
    if month == 2 && day == 29 && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Next occurrence of a birthday on or after `today`
pub fn next_occurrence(day: u32, month: u32, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = occurrence_in_year(day, month, today.year())?;
    if this_year < today {
        occurrence_in_year(day, month, today.year() + 1)
    } else {
        Some(this_year)
    }
}

/// Number of days from `today` until the next occurrence (0 means today)
pub fn days_until(day: u32, month: u32, today: NaiveDate) -> Option<i64> {
    next_occurrence(day, month, today).map(|next| (next - today).num_days())
}
