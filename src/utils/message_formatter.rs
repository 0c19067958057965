/// Pure functions for birthday message formatting (Discord-agnostic)
use poise::serenity_prelude::UserId;

use crate::constants::UNKNOWN_USER_LABEL;
use crate::models::BirthDate;
use crate::schedule::ReminderWindow;

/// Placeholder for a user that could not be resolved
pub fn format_unknown_user(user_id: UserId) -> String {
    format!("{} ({})", UNKNOWN_USER_LABEL, user_id)
}

/// Header of the aggregated reminder for a window
pub fn build_reminder_header(window: ReminderWindow) -> String {
    format!("📅 **Birthdays coming up in {}!**", window.label())
}

/// One line of a reminder message
pub fn build_reminder_entry(mention: &str, window: ReminderWindow) -> String {
    format!(
        "🎂 **{}** celebrates their birthday in **{}** 🎉",
        mention,
        window.label()
    )
}

/// Aggregated reminder: header followed by one line per user
pub fn build_reminder_message(window: ReminderWindow, mentions: &[String]) -> String {
    let entries = mentions
        .iter()
        .map(|mention| build_reminder_entry(mention, window))
        .collect::<Vec<_>>();
    format!("{}\n{}", build_reminder_header(window), entries.join("\n"))
}

/// "today", "tomorrow" or "in N days"
pub fn format_days_until(days_until: i64) -> String {
    match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    }
}

/// One line of the birthday list
pub fn build_list_entry(name: &str, date: BirthDate, days_until: i64) -> String {
    format!("🎂 {} : {} (**{}**)", name, date, format_days_until(days_until))
}

/// Birthday list sorted by proximity, entries already in display order
pub fn build_birthday_list(entries: &[String]) -> String {
    let mut message = "**📅 Birthdays (closest first):**".to_string();
    for entry in entries {
        message.push('\n');
        message.push_str(entry);
    }
    message
}
