use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use poise::serenity_prelude::UserId;

use super::ReminderWindow;

/// Marks of one user plus the generation of their last clear
#[derive(Debug, Default)]
struct UserMarks {
    cleared_at: u64,
    marks: HashSet<(ReminderWindow, i32)>,
}

/// Users already reminded, per window and birthday year
///
/// Lives for the whole process and is shared between the schedule manager
/// and the commands. All marks of one user sit in a single map entry, so a
/// clear never interleaves with a check or a mark for that user.
///
/// Every clear takes a new generation. A run takes a [`snapshot`] before it
/// reads the store and only marks users not cleared since, so a reminder
/// about a birthday changed mid-run cannot hide the new one.
///
/// [`snapshot`]: ReminderState::snapshot
#[derive(Debug, Default)]
pub struct ReminderState {
    notified: DashMap<UserId, UserMarks>,
    generation: AtomicU64,
}

impl ReminderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the latest clear, to be taken before reading the store
    pub fn snapshot(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether `user_id` was already reminded for the `year` occurrence of `window`
    pub fn is_notified(&self, user_id: UserId, window: ReminderWindow, year: i32) -> bool {
        self.notified
            .get(&user_id)
            .is_some_and(|entry| entry.marks.contains(&(window, year)))
    }

    /// Record that the given users were reminded
    ///
    /// Users cleared after `snapshot` are skipped, their reminder was about a
    /// birthday that no longer exists. Returns the number of users marked.
    pub fn mark_notified(
        &self,
        user_ids: &[UserId],
        window: ReminderWindow,
        year: i32,
        snapshot: u64,
    ) -> usize {
        let mut marked = 0;
        for &user_id in user_ids {
            let mut entry = self.notified.entry(user_id).or_default();
            if entry.cleared_at > snapshot {
                continue;
            }
            entry.marks.insert((window, year));
            marked += 1;
        }
        marked
    }

    /// Forget every reminder sent for a user, returns whether any existed
    pub fn clear_user(&self, user_id: UserId) -> bool {
        let mut entry = self.notified.entry(user_id).or_default();
        entry.cleared_at = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let had_marks = !entry.marks.is_empty();
        entry.marks.clear();
        had_marks
    }

    /// Drop marks for birthdays before `year`
    ///
    /// Users left without marks are forgotten once no run can still hold a
    /// snapshot older than their last clear.
    pub fn prune_before(&self, year: i32, snapshot: u64) {
        self.notified.retain(|_, entry| {
            entry.marks.retain(|&(_, marked_year)| marked_year >= year);
            !entry.marks.is_empty() || entry.cleared_at > snapshot
        });
    }

    /// Number of users with at least one mark
    pub fn tracked_users(&self) -> usize {
        self.notified
            .iter()
            .filter(|entry| !entry.marks.is_empty())
            .count()
    }
}
