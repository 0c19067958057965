use chrono::Utc;
use poise::CreateReply;
use poise::serenity_prelude::{self as serenity, Mentionable, UserId};
use tracing::error;

use crate::{
    constants::MAX_MESSAGE_LENGTH,
    error::BotError,
    models::{Context, Error},
    services::birthday_service::BirthdayService,
    utils::message_formatter::{build_birthday_list, build_list_entry, format_unknown_user},
    utils::messages::{
        build_database_error, build_empty_list_message, build_invalid_date_error,
        build_not_found_error, format_success, truncate_message,
    },
};

/// Manage birthdays
#[poise::command(
    slash_command,
    subcommands("add", "list", "birthday_for", "update", "delete"),
    subcommand_required
)]
pub async fn anniv(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Add a birthday
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "User whose birthday you want to save"] user: serenity::User,
    #[description = "Date in DD-MM format (e.g. 10-02)"] date: String,
) -> Result<(), Error> {
    let data = ctx.data();
    let service = BirthdayService::new(data.store.as_ref(), &data.reminders);

    match service.add(user.id, &date).await {
        Ok(date) => {
            reply(
                ctx,
                format_success(&format!(
                    "Birthday of {} added for **{}**!",
                    user.mention(),
                    date
                )),
                false,
            )
            .await
        }
        Err(e) => reply_error(ctx, e, user.display_name()).await,
    }
}

/// Show the saved birthdays, closest first
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let service = BirthdayService::new(data.store.as_ref(), &data.reminders);
    let today = Utc::now()
        .with_timezone(&data.settings.timezone)
        .date_naive();

    let upcoming = match service.upcoming(today).await {
        Ok(upcoming) => upcoming,
        Err(e) => return reply_error(ctx, e, "").await,
    };

    if upcoming.is_empty() {
        return reply(ctx, build_empty_list_message(), true).await;
    }

    // Resolving names can take several HTTP calls, acknowledge first
    ctx.defer().await?;

    let mut entries = Vec::with_capacity(upcoming.len());
    for birthday in &upcoming {
        let name = resolve_display_name(ctx, birthday.user_id).await;
        entries.push(build_list_entry(&name, birthday.date, birthday.days_until));
    }

    let message = truncate_message(&build_birthday_list(&entries), MAX_MESSAGE_LENGTH);
    reply(ctx, message, false).await
}

/// Show a user's birthday
#[poise::command(slash_command, rename = "for")]
pub async fn birthday_for(
    ctx: Context<'_>,
    #[description = "User whose birthday you want to see"] user: serenity::User,
) -> Result<(), Error> {
    let data = ctx.data();
    let service = BirthdayService::new(data.store.as_ref(), &data.reminders);

    match service.lookup(user.id).await {
        Ok(record) => {
            reply(
                ctx,
                format!(
                    "🎂 **{}**'s birthday is on **{}**!",
                    user.display_name(),
                    record.date
                ),
                false,
            )
            .await
        }
        Err(e) => reply_error(ctx, e, user.display_name()).await,
    }
}

/// Update a user's birthday
#[poise::command(slash_command)]
pub async fn update(
    ctx: Context<'_>,
    #[description = "User whose birthday you want to update"] user: serenity::User,
    #[description = "New date in DD-MM format (e.g. 10-02)"] date: String,
) -> Result<(), Error> {
    let data = ctx.data();
    let service = BirthdayService::new(data.store.as_ref(), &data.reminders);

    match service.update(user.id, &date).await {
        Ok(date) => {
            reply(
                ctx,
                format_success(&format!(
                    "Birthday of {} updated to **{}**!",
                    user.mention(),
                    date
                )),
                false,
            )
            .await
        }
        Err(e) => reply_error(ctx, e, user.display_name()).await,
    }
}

/// Delete a user's birthday
#[poise::command(slash_command)]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "User whose birthday you want to delete"] user: serenity::User,
) -> Result<(), Error> {
    let data = ctx.data();
    let service = BirthdayService::new(data.store.as_ref(), &data.reminders);

    match service.delete(user.id).await {
        Ok(()) => {
            reply(
                ctx,
                format!("🗑️ Birthday of **{}** deleted!", user.display_name()),
                false,
            )
            .await
        }
        Err(e) => reply_error(ctx, e, user.display_name()).await,
    }
}

async fn reply(ctx: Context<'_>, content: String, ephemeral: bool) -> Result<(), Error> {
    ctx.send(CreateReply::default().content(content).ephemeral(ephemeral))
        .await?;
    Ok(())
}

/// Answer a failed command privately; store failures are also logged
async fn reply_error(ctx: Context<'_>, error: BotError, user_name: &str) -> Result<(), Error> {
    if !error.is_user_facing() {
        error!("Command /anniv {} failed: {}", ctx.command().name, error);
    }

    let content = match &error {
        BotError::InvalidDateFormat(_) => build_invalid_date_error(),
        BotError::RecordNotFound(_) => build_not_found_error(user_name),
        BotError::Storage(_) | BotError::NotificationSinkUnavailable(_) => build_database_error(),
    };
    reply(ctx, content, true).await
}

/// Guild nickname if available, then the global name, then a placeholder
async fn resolve_display_name(ctx: Context<'_>, user_id: UserId) -> String {
    let cache_http = ctx.serenity_context();

    if let Some(guild_id) = ctx.guild_id()
        && let Ok(member) = guild_id.member(cache_http, user_id).await
    {
        return member.display_name().to_string();
    }

    match user_id.to_user(cache_http).await {
        Ok(user) => user.display_name().to_string(),
        Err(_) => format_unknown_user(user_id),
    }
}
