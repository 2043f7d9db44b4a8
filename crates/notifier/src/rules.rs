use crate::clock::ClockSnapshot;
use crate::snapshot::JournalSnapshot;
use core_types::Severity;

/// How long a rule's title must be absent from the log before it may fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cooldown {
    /// At most once per local calendar day.
    Daily,
    /// At most once per this many days.
    Days(i64),
}

/// One independently evaluated behavioral nudge.
///
/// A rule's title is fixed: it doubles as the deduplication key the engine
/// checks against the existing notification log. Rules read only the
/// snapshot and the injected clock; none may consult wall-clock time.
pub trait NotificationRule {
    fn title(&self) -> &'static str;
    fn severity(&self) -> Severity;
    fn cooldown(&self) -> Cooldown;
    /// The message to surface, or `None` when the rule does not fire.
    fn message(&self, snapshot: &JournalSnapshot, clock: &ClockSnapshot) -> Option<String>;
}

/// Fires when discipline is trending: at least 3 of the 5 most recent
/// post-session entries followed more than 2 rules.
pub struct MomentumRule;

impl NotificationRule for MomentumRule {
    fn title(&self) -> &'static str {
        "Momentum is building!"
    }

    fn severity(&self) -> Severity {
        Severity::Success
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(5)
    }

    fn message(&self, snapshot: &JournalSnapshot, _clock: &ClockSnapshot) -> Option<String> {
        let disciplined = snapshot
            .recent_post_rule_counts
            .iter()
            .filter(|&&count| count > 2)
            .count();
        (disciplined >= 3).then(|| {
            format!(
                "You stuck to your trading rules in {disciplined} of your last 5 reviews. \
                 Discipline like this compounds."
            )
        })
    }
}

/// Fires on a journaling streak of 10 days or more.
pub struct StreakMilestoneRule;

impl NotificationRule for StreakMilestoneRule {
    fn title(&self) -> &'static str {
        "Journaling streak milestone!"
    }

    fn severity(&self) -> Severity {
        Severity::Success
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(10)
    }

    fn message(&self, snapshot: &JournalSnapshot, _clock: &ClockSnapshot) -> Option<String> {
        (snapshot.journaling_streak_days >= 10).then(|| {
            format!(
                "{} consecutive days of journaling. The habit is doing its job.",
                snapshot.journaling_streak_days
            )
        })
    }
}

/// Evening reminder when nothing has been journaled today.
pub struct DailyReminderRule;

impl NotificationRule for DailyReminderRule {
    fn title(&self) -> &'static str {
        "Don't forget to journal today!"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Daily
    }

    fn message(&self, snapshot: &JournalSnapshot, clock: &ClockSnapshot) -> Option<String> {
        (clock.local_hour() >= 17 && snapshot.entries_today == 0).then(|| {
            "You haven't journaled yet today. A few minutes now keeps the record honest."
                .to_string()
        })
    }
}

/// Late-evening nudge to close the loop on a pre-session entry.
pub struct PostSessionReminderRule;

impl NotificationRule for PostSessionReminderRule {
    fn title(&self) -> &'static str {
        "Log your post-session review"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Daily
    }

    fn message(&self, snapshot: &JournalSnapshot, clock: &ClockSnapshot) -> Option<String> {
        let evening = (19..24).contains(&clock.local_hour());
        (evening && snapshot.pre_session_today && !snapshot.post_session_today).then(|| {
            "You wrote a pre-session entry today but no post-session review yet. \
             Close the loop while the day is fresh."
                .to_string()
        })
    }
}

/// Fires on a journaling streak of exactly 7 days.
pub struct SevenDayStreakRule;

impl NotificationRule for SevenDayStreakRule {
    fn title(&self) -> &'static str {
        "One full week of journaling!"
    }

    fn severity(&self) -> Severity {
        Severity::Success
    }

    fn cooldown(&self) -> Cooldown {
        Cooldown::Days(7)
    }

    fn message(&self, snapshot: &JournalSnapshot, _clock: &ClockSnapshot) -> Option<String> {
        (snapshot.journaling_streak_days == 7)
            .then(|| "Seven days straight. One week of honest records in the book.".to_string())
    }
}
