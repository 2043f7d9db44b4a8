use crate::clock::ClockSnapshot;
use chrono::NaiveDate;
use core_types::{JournalEntry, SessionType};
use std::collections::BTreeSet;

/// The precomputed journal facts the notification rules decide on.
///
/// Building this once per evaluation keeps the individual rules trivial and
/// keeps them from re-scanning the history five times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSnapshot {
    /// Followed-rule counts of the 5 most recent post-session entries,
    /// newest first.
    pub recent_post_rule_counts: Vec<usize>,
    /// Consecutive local days with at least one entry, counted back from
    /// today. A not-yet-journaled today does not break the run.
    pub journaling_streak_days: usize,
    pub entries_today: usize,
    pub pre_session_today: bool,
    pub post_session_today: bool,
}

impl JournalSnapshot {
    pub fn from_entries(entries: &[JournalEntry], clock: &ClockSnapshot) -> Self {
        let today = clock.today();

        let mut sorted: Vec<&JournalEntry> = entries.iter().collect();
        sorted.sort_by_key(|e| e.created_at);

        let recent_post_rule_counts: Vec<usize> = sorted
            .iter()
            .rev()
            .filter(|e| e.session_type == SessionType::Post)
            .take(5)
            .map(|e| e.rules_followed.len())
            .collect();

        let journaled_dates: BTreeSet<NaiveDate> = sorted
            .iter()
            .map(|e| clock.local_date_of(e.created_at))
            .collect();
        let mut streak = 0usize;
        let mut cursor = today;
        if !journaled_dates.contains(&cursor) {
            match cursor.pred_opt() {
                Some(yesterday) => cursor = yesterday,
                None => cursor = today,
            }
        }
        while journaled_dates.contains(&cursor) {
            streak += 1;
            let Some(previous) = cursor.pred_opt() else {
                break;
            };
            cursor = previous;
        }

        let entries_today = sorted
            .iter()
            .filter(|e| clock.local_date_of(e.created_at) == today)
            .count();
        let pre_session_today = sorted.iter().any(|e| {
            e.session_type == SessionType::Pre && clock.local_date_of(e.created_at) == today
        });
        let post_session_today = sorted.iter().any(|e| {
            e.session_type == SessionType::Post && clock.local_date_of(e.created_at) == today
        });

        Self {
            recent_post_rule_counts,
            journaling_streak_days: streak,
            entries_today,
            pre_session_today,
            post_session_today,
        }
    }
}
