use crate::emotion::emotion_score;
use crate::error::StatsError;
use crate::report::{DerivedStatistics, EmotionTrendPoint, MistakeCount, PairStats};
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{JournalEntry, Outcome, SessionType, Trade};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// A half-open time window `[start, end)` over entry creation timestamps.
pub type Interval = (DateTime<Utc>, DateTime<Utc>);

/// A stateless calculator for deriving statistics from journal history.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    /// Trades required on an instrument before its win rate is ranked.
    min_pair_trades: usize,
}

impl StatsEngine {
    pub fn new() -> Self {
        Self { min_pair_trades: 3 }
    }

    /// Overrides the per-pair significance floor (configuration-driven).
    pub fn with_min_pair_trades(min_pair_trades: usize) -> Self {
        Self { min_pair_trades }
    }

    /// The main entry point for deriving journal statistics.
    ///
    /// # Arguments
    ///
    /// * `entries` - The normalized journal history, in any order.
    /// * `interval` - An optional `[start, end)` window over the *parent
    ///   entry's* creation timestamp. `None` means the full history.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DerivedStatistics` or a `StatsError` when
    /// the interval is inverted.
    pub fn derive(
        &self,
        entries: &[JournalEntry],
        interval: Option<Interval>,
    ) -> Result<DerivedStatistics, StatsError> {
        if let Some((start, end)) = interval {
            if start > end {
                return Err(StatsError::InvalidInterval { start, end });
            }
        }

        // The source ordering is unspecified; sort explicitly wherever order
        // matters, starting with the entries themselves.
        let mut scoped: Vec<&JournalEntry> = entries
            .iter()
            .filter(|e| match interval {
                Some((start, end)) => e.created_at >= start && e.created_at < end,
                None => true,
            })
            .collect();
        scoped.sort_by_key(|e| e.created_at);

        let trades = chronological_trades(&scoped);

        let mut report = DerivedStatistics::new();
        report.total_trades = trades.len();
        report.valid_trades = trades.iter().filter(|t| t.has_valid_pnl()).count();
        report.win_rate_pct = self.win_rate(&trades);
        (report.longest_winning_streak, report.longest_losing_streak) = self.streaks(&trades);
        report.mistake_frequency = self.mistake_frequency(&scoped);
        report.pair_stats = self.pair_stats(&trades);
        report.emotion_trend = self.emotion_trend(&scoped);

        tracing::debug!(
            total = report.total_trades,
            valid = report.valid_trades,
            "derived journal statistics"
        );
        Ok(report)
    }

    /// `100 * wins / valid trades`, rounded to 2 decimal places.
    ///
    /// Returns exactly 0 when no trade has a valid PnL: an explicit
    /// zero-data policy, never `NaN` and never a division by zero.
    fn win_rate(&self, trades: &[&Trade]) -> Decimal {
        let valid = trades.iter().filter(|t| t.has_valid_pnl()).count();
        if valid == 0 {
            return Decimal::ZERO;
        }
        let wins = trades.iter().filter(|t| t.is_win()).count();
        ((Decimal::from(wins) / Decimal::from(valid)) * Decimal::from(100)).round_dp(2)
    }

    /// Longest winning and losing streaks over chronologically ordered trades.
    ///
    /// A trade with an invalid PnL is neither a win nor a loss: it resets
    /// *both* running counters. This mirrors the journal's historical
    /// behavior and is covered by a dedicated test; do not "fix" it to skip
    /// invalid trades without confirming the intended policy. Breakeven
    /// trades reset both counters the same way.
    fn streaks(&self, trades: &[&Trade]) -> (usize, usize) {
        let mut longest_win = 0usize;
        let mut longest_loss = 0usize;
        let mut current_win = 0usize;
        let mut current_loss = 0usize;

        for trade in trades {
            match trade.pnl {
                Some(pnl) if pnl > Decimal::ZERO => {
                    current_win += 1;
                    current_loss = 0;
                }
                Some(pnl) if pnl < Decimal::ZERO => {
                    current_loss += 1;
                    current_win = 0;
                }
                _ => {
                    current_win = 0;
                    current_loss = 0;
                }
            }
            longest_win = longest_win.max(current_win);
            longest_loss = longest_loss.max(current_loss);
        }

        (longest_win, longest_loss)
    }

    /// Mistake-tag counts over post-session losses, descending by count.
    ///
    /// The entries are scanned in chronological order and the sort is stable,
    /// so ties keep first-occurrence order and re-running on the same input
    /// yields the same ranking.
    fn mistake_frequency(&self, entries: &[&JournalEntry]) -> Vec<MistakeCount> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            if entry.session_type != SessionType::Post || entry.outcome != Some(Outcome::Loss) {
                continue;
            }
            for tag in &entry.mistakes {
                if !counts.contains_key(tag) {
                    order.push(tag.clone());
                }
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }

        let mut frequency: Vec<MistakeCount> = order
            .into_iter()
            .map(|tag| {
                let count = counts[&tag];
                MistakeCount { tag, count }
            })
            .collect();
        frequency.sort_by(|a, b| b.count.cmp(&a.count));
        frequency
    }

    /// Valid trades grouped by instrument, in first-seen order.
    ///
    /// An instrument's win rate is `Some` only once it reaches the
    /// significance floor; below that it stays `None` even at 100% wins.
    fn pair_stats(&self, trades: &[&Trade]) -> Vec<PairStats> {
        let mut order: Vec<String> = Vec::new();
        let mut tallies: HashMap<String, (usize, usize)> = HashMap::new();

        for trade in trades {
            if trade.symbol.is_empty() || !trade.has_valid_pnl() {
                continue;
            }
            if !tallies.contains_key(&trade.symbol) {
                order.push(trade.symbol.clone());
            }
            let (count, wins) = tallies.entry(trade.symbol.clone()).or_insert((0, 0));
            *count += 1;
            if trade.is_win() {
                *wins += 1;
            }
        }

        order
            .into_iter()
            .map(|symbol| {
                let (count, wins) = tallies[&symbol];
                let win_rate_pct = (count >= self.min_pair_trades).then(|| {
                    ((Decimal::from(wins) / Decimal::from(count)) * Decimal::from(100)).round_dp(2)
                });
                PairStats {
                    symbol,
                    trades: count,
                    win_rate_pct,
                }
            })
            .collect()
    }

    /// One point per date: the journaled emotional score and the net result
    /// of that date's valid trades.
    ///
    /// Entries without a scoreable emotion or without trades contribute
    /// nothing. When several entries share a date, the score is
    /// last-write-wins and the trading result is summed.
    fn emotion_trend(&self, entries: &[&JournalEntry]) -> Vec<EmotionTrendPoint> {
        let mut points: BTreeMap<NaiveDate, (u8, Decimal)> = BTreeMap::new();

        for entry in entries {
            let Some(score) = entry.emotion.as_deref().and_then(emotion_score) else {
                continue;
            };
            if entry.trades.is_empty() {
                continue;
            }
            let result: Decimal = entry.trades.iter().filter_map(|t| t.pnl).sum();
            points
                .entry(entry.created_at.date_naive())
                .and_modify(|(s, r)| {
                    *s = score;
                    *r += result;
                })
                .or_insert((score, result));
        }

        points
            .into_iter()
            .map(|(date, (emotional_score, trading_result))| EmotionTrendPoint {
                date,
                emotional_score,
                trading_result,
            })
            .collect()
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Flattens entries into their trades, ordered by trade entry time with the
/// parent entry's timestamp as the fallback.
fn chronological_trades<'a>(entries: &[&'a JournalEntry]) -> Vec<&'a Trade> {
    let mut trades: Vec<(DateTime<Utc>, &Trade)> = entries
        .iter()
        .copied()
        .flat_map(|entry| {
            entry
                .trades
                .iter()
                .map(move |trade| (trade.entry_time.unwrap_or(entry.created_at), trade))
        })
        .collect();
    trades.sort_by_key(|(at, _)| *at);
    trades.into_iter().map(|(_, trade)| trade).collect()
}
