use crate::enums::{Outcome, SessionType, Severity, TradeDirection};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One executed position, always owned by exactly one `JournalEntry`.
///
/// Numeric fields are `Option<Decimal>`: `None` is the invalid marker produced
/// by the normalizer when the source value failed coercion. Downstream
/// statistics must exclude `None` from both numerator and denominator; an
/// unparsable PnL is never the same thing as a PnL of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    /// Instrument symbol (e.g. "EUR/USD"). Empty when the source omitted it;
    /// such trades are excluded from per-pair statistics.
    pub symbol: String,
    pub direction: TradeDirection,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    /// Position size in lots.
    pub quantity: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    /// Realized profit-and-loss in account currency. `None` = invalid marker.
    pub pnl: Option<Decimal>,
    /// The setup tag the trader assigned (e.g. "breakout", "pullback").
    pub setup: Option<String>,
    /// References to stored screenshots; carried through for presentation.
    pub screenshots: Vec<String>,
}

impl Trade {
    /// Whether this trade carries a usable PnL value.
    pub fn has_valid_pnl(&self) -> bool {
        self.pnl.is_some()
    }

    /// Whether this trade counts as a win. Invalid PnL is neither a win nor a loss.
    pub fn is_win(&self) -> bool {
        matches!(self.pnl, Some(p) if p > Decimal::ZERO)
    }
}

/// One journaling session, pre- or post-trading, with its embedded trades.
///
/// Entries are read-only input to the analytics engine: they are created by
/// the capture frontend and never mutated here. The normalizer guarantees the
/// session-type invariants (`mistakes` only on post-session losses,
/// `pre_trading_activities` only on pre-sessions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub session_type: SessionType,
    /// Primary emotion label (e.g. "confident", "anxious").
    pub emotion: Option<String>,
    /// Finer-grained emotion label from the capture form.
    pub emotion_detail: Option<String>,
    pub notes: Option<String>,
    /// Post-session only.
    pub outcome: Option<Outcome>,
    /// Discipline-rule tags the trader marked as followed this session.
    pub rules_followed: Vec<String>,
    /// Mistake tags; populated only on post-session losses.
    pub mistakes: Vec<String>,
    /// Pre-session only (e.g. "meditation", "news review").
    pub pre_trading_activities: Vec<String>,
    pub trades: Vec<Trade>,
}

impl JournalEntry {
    /// Whether the entry carries journaling data beyond its trades.
    /// Trade-less entries are only worth keeping when this is true.
    pub fn has_journaling_data(&self) -> bool {
        self.emotion.is_some() || self.notes.is_some()
    }
}

/// A behavioral nudge produced by the notification rule engine.
///
/// Notifications are append-only: the engine emits new ones and never edits
/// or deletes prior entries in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// Fixed per rule; doubles as the deduplication key for cooldowns.
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
