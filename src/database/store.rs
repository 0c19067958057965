use async_trait::async_trait;
use poise::serenity_prelude::UserId;

use crate::error::BotError;
use crate::models::{BirthDate, BirthdayRecord};

/// Persistent mapping from user to birth date
///
/// Implementations must make `upsert` atomic per user: two concurrent
/// writes for the same user leave exactly one record, the last one committed.
#[async_trait]
pub trait BirthdayStore: Send + Sync {
    /// Insert or replace the birthday of `user_id`
    async fn upsert(&self, user_id: UserId, date: BirthDate) -> Result<(), BotError>;

    /// Whether a row exists for `user_id`, even one `get` cannot represent
    async fn exists(&self, user_id: UserId) -> Result<bool, BotError>;

    /// Get a user's birthday
    async fn get(&self, user_id: UserId) -> Result<Option<BirthdayRecord>, BotError>;

    /// All stored birthdays, in no particular order
    async fn list_all(&self) -> Result<Vec<BirthdayRecord>, BotError>;

    /// Remove a user's birthday. Returns false if there was none.
    async fn delete(&self, user_id: UserId) -> Result<bool, BotError>;
}
