/// Pure functions for formatting error and success messages (Discord-agnostic)
use crate::constants::DATE_SEPARATOR;

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Build a database error message (generic, doesn't expose internals)
pub fn build_database_error() -> String {
    format_error("A database error occurred. Please try again later.")
}

/// Build the reply for a date that is not `DD-MM` or does not exist
pub fn build_invalid_date_error() -> String {
    format_error(&format!(
        "Invalid date format. Correct usage: `DD{}MM` (e.g. 10{}02)",
        DATE_SEPARATOR, DATE_SEPARATOR
    ))
}

/// Build the reply for a user without a stored birthday
pub fn build_not_found_error(user_name: &str) -> String {
    format_error(&format!("No birthday registered for **{}**.", user_name))
}

/// Build the reply for an empty birthday list
pub fn build_empty_list_message() -> String {
    "📅 No birthdays registered.".to_string()
}

/// Truncate a long message with ellipsis
pub fn truncate_message(message: &str, max_length: usize) -> String {
    if message.chars().count() <= max_length {
        message.to_string()
    } else if max_length < 3 {
        message.chars().take(max_length).collect()
    } else {
        let truncated: String = message.chars().take(max_length - 3).collect();
        format!("{}...", truncated)
    }
}
