/// Reminder scheduling modules
mod manager;
mod notifier;
mod reminder_tasks;
mod state;
mod types;

// Re-export public types and functions
pub use manager::start_schedule_manager;
pub use notifier::NotificationSink;
pub use state::ReminderState;
pub use types::{ReminderSettings, ReminderWindow};
