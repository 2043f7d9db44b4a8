use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

/// A caller-supplied clock capability.
///
/// The engine never consults the wall clock; every notion of "now",
/// "today", and "current hour" derives from this injected value. That keeps
/// rule evaluation deterministic and lets tests pin time instead of
/// time-traveling the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSnapshot {
    now: DateTime<FixedOffset>,
}

impl ClockSnapshot {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// The caller's local hour, 0-23.
    pub fn local_hour(&self) -> u32 {
        self.now.hour()
    }

    /// The caller's local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// The instant used to stamp newly created notifications.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }

    /// Projects a stored UTC timestamp into the caller's local calendar date.
    pub fn local_date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.now.timezone()).date_naive()
    }
}
