//! # Notification Rule Engine
//!
//! Decides, given the journal history and the caller's clock, which
//! behavioral nudges to surface. The engine is a pure function of
//! `(snapshot, existing notifications, clock)`: it holds no state, reads no
//! wall clock, and only ever *appends* to the notification log.
//!
//! Each rule is independent, carries a fixed title that doubles as its
//! deduplication key, and is throttled by a cooldown window (once per local
//! calendar day, or once per N days) checked against the existing log
//! before the rule is evaluated at all.

pub mod clock;
pub mod engine;
pub mod rules;
pub mod snapshot;

pub use clock::ClockSnapshot;
pub use engine::NotificationEngine;
pub use rules::{
    Cooldown, DailyReminderRule, MomentumRule, NotificationRule, PostSessionReminderRule,
    SevenDayStreakRule, StreakMilestoneRule,
};
pub use snapshot::JournalSnapshot;
