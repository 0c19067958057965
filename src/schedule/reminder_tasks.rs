use chrono::{Datelike, NaiveDate};
use poise::serenity_prelude::UserId;
use tracing::{info, warn};

use super::{NotificationSink, ReminderState, ReminderWindow};
use crate::database::BirthdayStore;
use crate::error::BotError;
use crate::models::BirthdayRecord;
use crate::utils::datetime::occurrence_in_year;
use crate::utils::message_formatter::build_reminder_message;

/// Users to remind for one window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderBatch {
    pub window: ReminderWindow,
    /// Year of the birthday occurrence the reminder is about
    pub year: i32,
    pub users: Vec<UserId>,
}

/// Outcome of one reminder run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReminderRunSummary {
    /// Windows whose message was delivered, with the number of users in it
    pub sent: Vec<(ReminderWindow, usize)>,
    /// Windows whose message failed to send, left unmarked for retry
    pub failed: Vec<ReminderWindow>,
}

/// Pick the users whose birthday is exactly one window away from `today`
///
/// Users already marked for that window and year are left out. Only
/// windows with at least one user are returned.
pub fn classify_reminders(
    today: NaiveDate,
    records: &[BirthdayRecord],
    state: &ReminderState,
) -> Vec<ReminderBatch> {
    ReminderWindow::ALL
        .iter()
        .filter_map(|&window| {
            let target = window.target_date(today);
            let year = target.year();

            let users: Vec<UserId> = records
                .iter()
                .filter(|record| {
                    occurrence_in_year(record.date.day(), record.date.month(), year)
                        == Some(target)
                })
                .map(|record| record.user_id)
                .filter(|&user_id| !state.is_notified(user_id, window, year))
                .collect();

            (!users.is_empty()).then_some(ReminderBatch {
                window,
                year,
                users,
            })
        })
        .collect()
}

/// Check for upcoming birthdays and send one message per due window
///
/// The channel is checked before anything is read or marked. Users are
/// marked only once their window's message went out, and not at all if
/// their birthday was changed while the run was in flight.
pub async fn run_reminder_check(
    store: &dyn BirthdayStore,
    sink: &dyn NotificationSink,
    state: &ReminderState,
    today: NaiveDate,
) -> Result<ReminderRunSummary, BotError> {
    info!("Checking upcoming birthdays for {}", today);

    sink.ensure_available().await?;

    let snapshot = state.snapshot();
    let records = store.list_all().await?;
    state.prune_before(today.year(), snapshot);

    let batches = classify_reminders(today, &records, state);
    if batches.is_empty() {
        info!("No reminders due among {} birthday(s)", records.len());
        return Ok(ReminderRunSummary::default());
    }

    let mut summary = ReminderRunSummary::default();
    for batch in batches {
        let mut mentions = Vec::with_capacity(batch.users.len());
        for &user_id in &batch.users {
            mentions.push(sink.mention(user_id).await);
        }

        let content = build_reminder_message(batch.window, &mentions);
        match sink.send(&content).await {
            Ok(()) => {
                let marked =
                    state.mark_notified(&batch.users, batch.window, batch.year, snapshot);
                if marked < batch.users.len() {
                    info!(
                        "{} user(s) changed their birthday during the {} reminder",
                        batch.users.len() - marked,
                        batch.window.label()
                    );
                }
                info!(
                    "Sent {} reminder for {} user(s)",
                    batch.window.label(),
                    batch.users.len()
                );
                summary.sent.push((batch.window, batch.users.len()));
            }
            Err(e) => {
                warn!("Failed to send {} reminder: {}", batch.window.label(), e);
                summary.failed.push(batch.window);
            }
        }
    }

    info!("Tracking reminders for {} user(s)", state.tracked_users());
    Ok(summary)
}
