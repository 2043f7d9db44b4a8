use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One mistake tag with its occurrence count across post-session losses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeCount {
    pub tag: String,
    pub count: usize,
}

/// Per-instrument performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairStats {
    pub symbol: String,
    /// Number of trades with a valid PnL on this instrument.
    pub trades: usize,
    /// `None` below the statistical-significance floor (too few trades to
    /// rank), even if every one of them was a winner.
    pub win_rate_pct: Option<Decimal>,
}

/// One point of the emotion/performance trend: the emotional score journaled
/// on a date and the net result of that date's valid trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionTrendPoint {
    pub date: NaiveDate,
    /// 0-100 domain scale; last write wins when a date has several entries.
    pub emotional_score: u8,
    /// Sum of the date's valid PnL values.
    pub trading_result: Decimal,
}

/// A recomputed-on-demand projection of the journal history.
///
/// This struct is the final output of the `StatsEngine` and serves as the
/// data transfer object for derived statistics throughout the entire system.
/// It is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStatistics {
    // I. Trade-Level Statistics
    /// In [0, 100]; exactly 0 when no trade has a valid PnL.
    pub win_rate_pct: Decimal,
    pub longest_winning_streak: usize,
    pub longest_losing_streak: usize,
    pub total_trades: usize,
    /// Trades whose PnL survived coercion; the denominator of every ratio.
    pub valid_trades: usize,

    // II. Behavioral Statistics
    /// Descending by count; ties keep first-occurrence order.
    pub mistake_frequency: Vec<MistakeCount>,
    /// First-seen instrument order.
    pub pair_stats: Vec<PairStats>,
    /// Ordered by date.
    pub emotion_trend: Vec<EmotionTrendPoint>,
}

impl DerivedStatistics {
    /// Creates a new, zeroed-out DerivedStatistics.
    /// This is useful as a default or starting point before calculations.
    pub fn new() -> Self {
        Self {
            win_rate_pct: Decimal::ZERO,
            longest_winning_streak: 0,
            longest_losing_streak: 0,
            total_trades: 0,
            valid_trades: 0,
            mistake_frequency: Vec::new(),
            pair_stats: Vec::new(),
            emotion_trend: Vec::new(),
        }
    }

    /// The most frequent mistake, or `None` when the journal records none.
    pub fn top_mistake(&self) -> Option<&MistakeCount> {
        self.mistake_frequency.first()
    }

    /// The rankable instrument with the lowest win rate. Instruments below
    /// the significance floor never qualify.
    pub fn worst_pair(&self) -> Option<&PairStats> {
        self.pair_stats
            .iter()
            .filter(|p| p.win_rate_pct.is_some())
            .fold(None, |worst: Option<&PairStats>, candidate| match worst {
                // Strict comparison keeps the first-seen pair on ties.
                Some(w) if w.win_rate_pct <= candidate.win_rate_pct => Some(w),
                _ => Some(candidate),
            })
    }
}

impl Default for DerivedStatistics {
    fn default() -> Self {
        Self::new()
    }
}
