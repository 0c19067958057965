use chrono::{DateTime, TimeZone, Utc};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::time::{Duration, sleep, timeout};
use tracing::{error, info};

use super::notifier::{DiscordNotifier, NotificationSink};
use super::reminder_tasks::run_reminder_check;
use crate::error::BotError;
use crate::models::Data;

/// Start the schedule manager that runs the reminder check periodically
///
/// Runs once right away, then on every tick of the configured cron schedule.
pub fn start_schedule_manager(
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
    data: Arc<Data>,
) {
    tokio::spawn(async move {
        info!("Schedule manager started");

        let settings = data.settings.clone();
        let notifier = DiscordNotifier::new(http, cache, settings.channel_id);

        run_scheduled_check(&data, &notifier).await;

        loop {
            let now = Utc::now().with_timezone(&settings.timezone);
            let Some(wait_duration) = find_next_run(&settings.schedule, &now) else {
                error!("Reminder schedule has no upcoming time, stopping");
                break;
            };

            info!(
                "Next reminder check will run in {} minutes",
                wait_duration.as_secs() / 60
            );
            sleep(wait_duration).await;

            run_scheduled_check(&data, &notifier).await;
        }

        info!("Schedule manager stopped");
    });
}

/// Time until the next tick of `schedule` after `now`
fn find_next_run<Z: TimeZone>(schedule: &cron::Schedule, now: &DateTime<Z>) -> Option<Duration> {
    let next_time = schedule.after(now).next()?;
    Some(
        next_time
            .signed_duration_since(now.clone())
            .to_std()
            .unwrap_or(Duration::from_secs(60)),
    )
}

/// Run one bounded reminder check, logging instead of propagating failures
async fn run_scheduled_check(data: &Data, notifier: &dyn NotificationSink) {
    let today = Utc::now()
        .with_timezone(&data.settings.timezone)
        .date_naive();

    let run = run_reminder_check(data.store.as_ref(), notifier, &data.reminders, today);
    match timeout(data.settings.run_timeout, run).await {
        Ok(Ok(summary)) => {
            if !summary.failed.is_empty() {
                error!(
                    "{} reminder message(s) could not be sent, will retry next run",
                    summary.failed.len()
                );
            }
        }
        Ok(Err(BotError::NotificationSinkUnavailable(reason))) => {
            error!(
                "Birthday reminder channel not available, skipping this cycle: {}",
                reason
            );
        }
        Ok(Err(e)) => {
            error!("Failed to run reminder check: {}", e);
        }
        Err(_) => {
            error!(
                "Reminder check did not finish within {} seconds",
                data.settings.run_timeout.as_secs()
            );
        }
    }
}
