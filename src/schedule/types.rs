use std::time::Duration;

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;
use poise::serenity_prelude::ChannelId;

/// Lead time before a birthday at which a reminder is posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderWindow {
    OneMonth,
    TwoWeeks,
}

impl ReminderWindow {
    /// Every window, in the order reminders are sent
    pub const ALL: [ReminderWindow; 2] = [ReminderWindow::OneMonth, ReminderWindow::TwoWeeks];

    /// Days between the reminder and the birthday
    pub fn offset_days(self) -> u64 {
        match self {
            ReminderWindow::OneMonth => 28,
            ReminderWindow::TwoWeeks => 14,
        }
    }

    /// Birthday date a reminder sent on `today` is about
    pub fn target_date(self, today: NaiveDate) -> NaiveDate {
        today + Days::new(self.offset_days())
    }

    /// Human readable lead time, used in messages
    pub fn label(self) -> &'static str {
        match self {
            ReminderWindow::OneMonth => "1 month",
            ReminderWindow::TwoWeeks => "2 weeks",
        }
    }
}

/// Where and when reminders are sent
#[derive(Debug, Clone)]
pub struct ReminderSettings {
    pub channel_id: ChannelId,
    /// Timezone that defines "today"
    pub timezone: Tz,
    /// Trigger for the reminder check (e.g., "0 0 9 * * *" for 9 AM daily)
    pub schedule: cron::Schedule,
    /// Upper bound for a single run
    pub run_timeout: Duration,
}
