use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, ChannelId, CreateMessage, Mentionable, UserId};
use tracing::warn;

use crate::error::BotError;
use crate::utils::message_formatter::format_unknown_user;

/// Destination for reminder messages
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Fail with `NotificationSinkUnavailable` if nothing can be delivered right now
    async fn ensure_available(&self) -> Result<(), BotError>;

    /// Post a text message
    async fn send(&self, content: &str) -> Result<(), BotError>;

    /// Best-effort mention for a user, falls back to a placeholder
    async fn mention(&self, user_id: UserId) -> String;
}

/// Sends reminders to the configured Discord channel
pub struct DiscordNotifier {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
    channel_id: ChannelId,
}

impl DiscordNotifier {
    pub fn new(http: Arc<serenity::Http>, cache: Arc<serenity::Cache>, channel_id: ChannelId) -> Self {
        Self {
            http,
            cache,
            channel_id,
        }
    }

    fn unavailable(&self, e: serenity::Error) -> BotError {
        BotError::NotificationSinkUnavailable(format!("channel {}: {}", self.channel_id, e))
    }
}

#[async_trait]
impl NotificationSink for DiscordNotifier {
    async fn ensure_available(&self) -> Result<(), BotError> {
        self.channel_id
            .to_channel(&self.http)
            .await
            .map(|_| ())
            .map_err(|e| self.unavailable(e))
    }

    async fn send(&self, content: &str) -> Result<(), BotError> {
        let message = CreateMessage::new().content(content);
        self.channel_id
            .send_message(&self.http, message)
            .await
            .map(|_| ())
            .map_err(|e| self.unavailable(e))
    }

    async fn mention(&self, user_id: UserId) -> String {
        if self.cache.user(user_id).is_some() {
            return user_id.mention().to_string();
        }

        match user_id.to_user(&self.http).await {
            Ok(user) => user.mention().to_string(),
            Err(e) => {
                warn!("Failed to resolve user {}: {}", user_id, e);
                format_unknown_user(user_id)
            }
        }
    }
}
