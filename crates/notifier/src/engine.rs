use crate::clock::ClockSnapshot;
use crate::rules::{
    Cooldown, DailyReminderRule, MomentumRule, NotificationRule, PostSessionReminderRule,
    SevenDayStreakRule, StreakMilestoneRule,
};
use crate::snapshot::JournalSnapshot;
use core_types::Notification;
use uuid::Uuid;

/// Evaluates the rule list against a journal snapshot and the existing
/// notification log.
pub struct NotificationEngine {
    rules: Vec<Box<dyn NotificationRule>>,
}

impl NotificationEngine {
    /// The production rule list, in evaluation order.
    pub fn with_default_rules() -> Self {
        Self {
            rules: vec![
                Box::new(MomentumRule),
                Box::new(StreakMilestoneRule),
                Box::new(DailyReminderRule),
                Box::new(PostSessionReminderRule),
                Box::new(SevenDayStreakRule),
            ],
        }
    }

    pub fn with_rules(rules: Vec<Box<dyn NotificationRule>>) -> Self {
        Self { rules }
    }

    /// Decides which new notifications to surface.
    ///
    /// Pure with respect to its inputs: the existing log is only read, never
    /// mutated; the caller appends the returned notifications itself. A rule
    /// whose title is already in the log inside its cooldown window is
    /// skipped before its trigger is even evaluated.
    pub fn evaluate(
        &self,
        snapshot: &JournalSnapshot,
        existing: &[Notification],
        clock: &ClockSnapshot,
    ) -> Vec<Notification> {
        let mut fresh = Vec::new();
        for rule in &self.rules {
            if on_cooldown(rule.as_ref(), existing, clock) {
                continue;
            }
            if let Some(message) = rule.message(snapshot, clock) {
                tracing::debug!(title = rule.title(), "notification rule fired");
                fresh.push(Notification {
                    id: Uuid::new_v4(),
                    title: rule.title().to_string(),
                    message,
                    severity: rule.severity(),
                    read: false,
                    created_at: clock.timestamp(),
                });
            }
        }
        fresh
    }
}

fn on_cooldown(rule: &dyn NotificationRule, existing: &[Notification], clock: &ClockSnapshot) -> bool {
    match rule.cooldown() {
        Cooldown::Daily => existing
            .iter()
            .any(|n| n.title == rule.title() && clock.local_date_of(n.created_at) == clock.today()),
        Cooldown::Days(days) => existing
            .iter()
            .filter(|n| n.title == rule.title())
            .map(|n| n.created_at)
            .max()
            .is_some_and(|latest| {
                let elapsed = clock
                    .today()
                    .signed_duration_since(clock.local_date_of(latest))
                    .num_days();
                elapsed < days
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use core_types::{JournalEntry, SessionType, Severity};

    fn clock_at(day: u32, hour: u32) -> ClockSnapshot {
        let offset = FixedOffset::east_opt(0).unwrap();
        ClockSnapshot::new(
            offset
                .with_ymd_and_hms(2025, 3, day, hour, 0, 0)
                .unwrap(),
        )
    }

    fn entry(day: u32, hour: u32, session_type: SessionType, rules: usize) -> JournalEntry {
        JournalEntry {
            id: Uuid::new_v4(),
            created_at: Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap(),
            session_type,
            emotion: Some("calm".to_string()),
            emotion_detail: None,
            notes: None,
            outcome: None,
            rules_followed: (0..rules).map(|i| format!("rule-{i}")).collect(),
            mistakes: Vec::new(),
            pre_trading_activities: Vec::new(),
            trades: Vec::new(),
        }
    }

    fn notification(title: &str, at: DateTime<Utc>) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            title: title.to_string(),
            message: "m".to_string(),
            severity: Severity::Info,
            read: false,
            created_at: at,
        }
    }

    fn titles(notifications: &[Notification]) -> Vec<&str> {
        notifications.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn daily_reminder_fires_in_the_evening_with_no_entries() {
        let clock = clock_at(15, 18);
        let snapshot = JournalSnapshot::from_entries(&[], &clock);
        let fresh = NotificationEngine::with_default_rules().evaluate(&snapshot, &[], &clock);
        assert_eq!(titles(&fresh), vec!["Don't forget to journal today!"]);
        let reminder = &fresh[0];
        assert_eq!(reminder.severity, Severity::Info);
        assert!(!reminder.read);
    }

    #[test]
    fn daily_reminder_respects_the_same_day_log_entry() {
        let clock = clock_at(15, 18);
        let snapshot = JournalSnapshot::from_entries(&[], &clock);
        let existing = vec![notification(
            "Don't forget to journal today!",
            Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap(),
        )];
        let fresh =
            NotificationEngine::with_default_rules().evaluate(&snapshot, &existing, &clock);
        assert!(fresh.is_empty());
    }

    #[test]
    fn daily_reminder_can_fire_again_the_next_day() {
        let clock = clock_at(16, 18);
        let snapshot = JournalSnapshot::from_entries(&[], &clock);
        let existing = vec![notification(
            "Don't forget to journal today!",
            Utc.with_ymd_and_hms(2025, 3, 15, 18, 0, 0).unwrap(),
        )];
        let fresh =
            NotificationEngine::with_default_rules().evaluate(&snapshot, &existing, &clock);
        assert_eq!(titles(&fresh), vec!["Don't forget to journal today!"]);
    }

    #[test]
    fn daily_reminder_stays_quiet_before_five_pm_or_after_journaling() {
        let engine = NotificationEngine::with_default_rules();

        let early = clock_at(15, 16);
        let snapshot = JournalSnapshot::from_entries(&[], &early);
        assert!(engine.evaluate(&snapshot, &[], &early).is_empty());

        let evening = clock_at(15, 18);
        let journaled = [entry(15, 10, SessionType::Post, 0)];
        let snapshot = JournalSnapshot::from_entries(&journaled, &evening);
        assert!(engine.evaluate(&snapshot, &[], &evening).is_empty());
    }

    #[test]
    fn momentum_fires_on_three_disciplined_reviews_of_five() {
        let entries: Vec<JournalEntry> = [3, 4, 3, 1, 0]
            .iter()
            .enumerate()
            .map(|(i, &rules)| entry(10 + i as u32, 10, SessionType::Post, rules))
            .collect();
        let clock = clock_at(14, 12);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        let fresh = NotificationEngine::with_default_rules().evaluate(&snapshot, &[], &clock);
        assert!(titles(&fresh).contains(&"Momentum is building!"));
    }

    #[test]
    fn momentum_needs_more_than_two_rules_per_review() {
        // Five reviews, each with exactly 2 followed rules: none qualify.
        let entries: Vec<JournalEntry> = (0..5)
            .map(|i| entry(10 + i as u32, 10, SessionType::Post, 2))
            .collect();
        let clock = clock_at(14, 12);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        let fresh = NotificationEngine::with_default_rules().evaluate(&snapshot, &[], &clock);
        assert!(!titles(&fresh).contains(&"Momentum is building!"));
    }

    #[test]
    fn momentum_cooldown_spans_five_days() {
        let entries: Vec<JournalEntry> = (0..5)
            .map(|i| entry(10 + i as u32, 10, SessionType::Post, 5))
            .collect();
        let clock = clock_at(14, 12);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        let engine = NotificationEngine::with_default_rules();

        let recent = vec![notification(
            "Momentum is building!",
            Utc.with_ymd_and_hms(2025, 3, 11, 12, 0, 0).unwrap(),
        )];
        assert!(!titles(&engine.evaluate(&snapshot, &recent, &clock))
            .contains(&"Momentum is building!"));

        let stale = vec![notification(
            "Momentum is building!",
            Utc.with_ymd_and_hms(2025, 3, 8, 12, 0, 0).unwrap(),
        )];
        assert!(titles(&engine.evaluate(&snapshot, &stale, &clock))
            .contains(&"Momentum is building!"));
    }

    #[test]
    fn seven_day_streak_fires_exactly_at_seven() {
        let entries: Vec<JournalEntry> = (9..=15)
            .map(|day| entry(day, 10, SessionType::Post, 0))
            .collect();
        let clock = clock_at(15, 12);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        assert_eq!(snapshot.journaling_streak_days, 7);
        let fresh = NotificationEngine::with_default_rules().evaluate(&snapshot, &[], &clock);
        assert!(titles(&fresh).contains(&"One full week of journaling!"));
        assert!(!titles(&fresh).contains(&"Journaling streak milestone!"));
    }

    #[test]
    fn ten_day_streak_fires_the_milestone_not_the_week() {
        let entries: Vec<JournalEntry> = (6..=15)
            .map(|day| entry(day, 10, SessionType::Post, 0))
            .collect();
        let clock = clock_at(15, 12);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        assert_eq!(snapshot.journaling_streak_days, 10);
        let fresh = NotificationEngine::with_default_rules().evaluate(&snapshot, &[], &clock);
        assert!(titles(&fresh).contains(&"Journaling streak milestone!"));
        assert!(!titles(&fresh).contains(&"One full week of journaling!"));
    }

    #[test]
    fn a_gap_breaks_the_journaling_streak() {
        // Days 12 and 13 journaled, day 11 missing: the run stops at 2.
        let entries = vec![
            entry(12, 10, SessionType::Post, 0),
            entry(13, 10, SessionType::Post, 0),
            entry(9, 10, SessionType::Post, 0),
        ];
        let clock = clock_at(13, 20);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        assert_eq!(snapshot.journaling_streak_days, 2);
    }

    #[test]
    fn missing_today_does_not_break_the_streak_yet() {
        let entries: Vec<JournalEntry> = (11..=14)
            .map(|day| entry(day, 10, SessionType::Post, 0))
            .collect();
        let clock = clock_at(15, 9);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        assert_eq!(snapshot.journaling_streak_days, 4);
    }

    #[test]
    fn post_session_reminder_needs_the_evening_window() {
        let engine = NotificationEngine::with_default_rules();
        let pre_only = [entry(15, 8, SessionType::Pre, 0)];

        let at_19 = clock_at(15, 19);
        let snapshot = JournalSnapshot::from_entries(&pre_only, &at_19);
        assert!(titles(&engine.evaluate(&snapshot, &[], &at_19))
            .contains(&"Log your post-session review"));

        let at_18 = clock_at(15, 18);
        let snapshot = JournalSnapshot::from_entries(&pre_only, &at_18);
        assert!(!titles(&engine.evaluate(&snapshot, &[], &at_18))
            .contains(&"Log your post-session review"));
    }

    #[test]
    fn post_session_reminder_quiets_once_the_review_exists() {
        let both = [
            entry(15, 8, SessionType::Pre, 0),
            entry(15, 17, SessionType::Post, 0),
        ];
        let clock = clock_at(15, 20);
        let snapshot = JournalSnapshot::from_entries(&both, &clock);
        let fresh = NotificationEngine::with_default_rules().evaluate(&snapshot, &[], &clock);
        assert!(!titles(&fresh).contains(&"Log your post-session review"));
    }

    #[test]
    fn new_notifications_are_stamped_from_the_clock() {
        let clock = clock_at(15, 18);
        let snapshot = JournalSnapshot::from_entries(&[], &clock);
        let fresh = NotificationEngine::with_default_rules().evaluate(&snapshot, &[], &clock);
        assert_eq!(fresh[0].created_at, clock.timestamp());
    }

    #[test]
    fn snapshot_keeps_the_five_most_recent_reviews_newest_first() {
        let mut entries: Vec<JournalEntry> = (1..=7)
            .map(|day| entry(day, 10, SessionType::Post, day as usize))
            .collect();
        entries.push(entry(8, 10, SessionType::Pre, 99));
        let clock = clock_at(8, 12);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        // Pre-session entries do not count; newest post first.
        assert_eq!(snapshot.recent_post_rule_counts, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn evaluation_is_deterministic_for_pinned_inputs() {
        let entries: Vec<JournalEntry> = (9..=15)
            .map(|day| entry(day, 10, SessionType::Post, 4))
            .collect();
        let clock = clock_at(15, 18);
        let snapshot = JournalSnapshot::from_entries(&entries, &clock);
        let engine = NotificationEngine::with_default_rules();
        let first = engine.evaluate(&snapshot, &[], &clock);
        let second = engine.evaluate(&snapshot, &[], &clock);
        assert_eq!(titles(&first), titles(&second));
    }
}
