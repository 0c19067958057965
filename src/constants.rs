/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "happyb_rs=info";

/// Separator between day and month in user-facing dates (e.g. `10-02`)
pub const DATE_SEPARATOR: char = '-';

/// Leap year used to validate year-less birthdays, so 29-02 is accepted
pub const LEAP_REFERENCE_YEAR: i32 = 2000;

/// Timezone used to compute "today" when `BOT_TIMEZONE` is not set
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Reminder check runs every day at 09:00 unless `REMINDER_CRON` is set
pub const DEFAULT_REMINDER_CRON: &str = "0 0 9 * * *";

/// Upper bound for a single reminder run, in seconds
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 120;

/// Placeholder shown when a user can no longer be resolved
pub const UNKNOWN_USER_LABEL: &str = "Unknown user";

/// Discord rejects messages longer than this
pub const MAX_MESSAGE_LENGTH: usize = 2000;
