mod commands;
mod config;
mod constants;
mod database;
mod error;
mod models;
mod schedule;
mod services;
mod utils;

use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    commands::anniv,
    config::Config,
    constants::LOG_DIRECTIVE,
    database::Database,
    models::Data,
    schedule::start_schedule_manager,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database
    let db = match Database::new(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if config.dev_guild_id.is_some() {
        info!("Development mode: Commands will be registered to guild only");
    }

    let data = Data::new(Arc::new(db), config.reminders);

    // Create and start the bot
    if let Err(e) = start_bot(config.discord_token, data, config.dev_guild_id).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Create and start the Discord bot
async fn start_bot(
    token: String,
    data: Data,
    dev_guild_id: Option<u64>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Wrap data in Arc for sharing with the schedule manager
    let data_for_framework = Arc::new(data);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![anniv()],
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            let http = ctx.http.clone();
            let cache = ctx.cache.clone();
            let data_clone = Arc::clone(&data_for_framework);
            info!("Bot is connected as {}", ready.user.name);

            Box::pin(async move {
                // Register commands based on dev_guild_id
                if let Some(guild_id) = dev_guild_id {
                    let guild = serenity::GuildId::new(guild_id);
                    info!("Registering commands in development guild: {}", guild_id);
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild)
                        .await?;
                    info!(
                        "Commands registered in guild {} (instant updates)",
                        guild_id
                    );
                } else {
                    info!("Registering commands globally (may take up to 1 hour)");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Commands registered globally");
                }

                // Start reminders once commands are in place
                start_schedule_manager(http, cache, Arc::clone(&data_clone));
                info!("Schedule manager task started");

                info!("Bot is ready!");

                Ok((*data_clone).clone())
            })
        })
        .build();

    // Members intent lets the cache resolve mentions and display names
    let intents = serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    // Start the bot
    info!("Starting bot...");
    client.start().await?;

    Ok(())
}
