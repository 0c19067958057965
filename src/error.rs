use poise::serenity_prelude::UserId;
use thiserror::Error;

/// Failures of the birthday store, the reminder engine and the commands
#[derive(Debug, Error)]
pub enum BotError {
    /// Input that is not `DD-MM` or names a day that does not exist
    #[error("invalid date '{0}', expected DD-MM (e.g. 10-02)")]
    InvalidDateFormat(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("notification channel unavailable: {0}")]
    NotificationSinkUnavailable(String),

    #[error("no birthday registered for user {0}")]
    RecordNotFound(UserId),
}

impl BotError {
    /// True for negative results that are answered to the user, not logged as failures
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BotError::InvalidDateFormat(_) | BotError::RecordNotFound(_)
        )
    }
}
