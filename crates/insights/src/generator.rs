use crate::error::InsightError;
use crate::report::{HeatmapCell, InsightData, InsightKind, InsightValue};
use analytics::{Interval, StatsEngine};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use configuration::InsightSettings;
use core_types::{JournalEntry, Trade};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Computes the fixed set of month-scoped "wrapped" insight cards.
pub struct MonthlyInsightGenerator {
    settings: InsightSettings,
    stats: StatsEngine,
}

impl MonthlyInsightGenerator {
    pub fn new(settings: InsightSettings) -> Self {
        let stats = StatsEngine::with_min_pair_trades(settings.min_pair_trades);
        Self { settings, stats }
    }

    /// Generates the ordered insight cards for one calendar month.
    ///
    /// Entries outside the target month are ignored. Each card degrades to
    /// `InsightValue::NotEnoughData` independently when its own sample-size
    /// floor is unmet.
    pub fn generate(
        &self,
        entries: &[JournalEntry],
        month: u32,
        year: i32,
    ) -> Result<Vec<InsightData>, InsightError> {
        let interval = month_interval(month, year)?;
        let report = self.stats.derive(entries, Some(interval))?;

        let mut scoped: Vec<&JournalEntry> = entries
            .iter()
            .filter(|e| e.created_at >= interval.0 && e.created_at < interval.1)
            .collect();
        scoped.sort_by_key(|e| e.created_at);

        // Trades paired with their effective timestamp for hour/day bucketing.
        let trades: Vec<(DateTime<Utc>, &Trade)> = scoped
            .iter()
            .copied()
            .flat_map(|e| {
                e.trades
                    .iter()
                    .map(move |t| (t.entry_time.unwrap_or(e.created_at), t))
            })
            .collect();

        let streak_value = |streak: usize| {
            if report.valid_trades == 0 {
                InsightValue::NotEnoughData
            } else {
                InsightValue::Count(streak)
            }
        };

        let win_rate = if report.valid_trades == 0 {
            InsightData::new(
                InsightKind::WinRate,
                InsightValue::NotEnoughData,
                "Share of valid trades closed in profit this month",
            )
        } else {
            InsightData::new(
                InsightKind::WinRate,
                InsightValue::Percent(report.win_rate_pct),
                "Share of valid trades closed in profit this month",
            )
            .with_info(format!("{} valid trades", report.valid_trades))
        };

        let cards = vec![
            win_rate,
            InsightData::new(
                InsightKind::WinningStreak,
                streak_value(report.longest_winning_streak),
                "Longest run of consecutive winning trades this month",
            ),
            InsightData::new(
                InsightKind::LosingStreak,
                streak_value(report.longest_losing_streak),
                "Longest run of consecutive losing trades this month",
            ),
            self.most_active_hour(&trades),
            self.favorite_setup(&trades),
            self.average_holding_time(&trades),
            self.mood_performance(&scoped),
            self.overtrading(&trades),
            self.emotional_heatmap(&scoped),
        ];

        tracing::debug!(month, year, entries = scoped.len(), "generated monthly insights");
        Ok(cards)
    }

    /// The hour bucket (0-23) with the most trade entries; earliest hour on ties.
    fn most_active_hour(&self, trades: &[(DateTime<Utc>, &Trade)]) -> InsightData {
        let description = "The hour of day when most trades were opened";
        if trades.is_empty() {
            return InsightData::new(
                InsightKind::MostActiveHour,
                InsightValue::NotEnoughData,
                description,
            );
        }

        let mut buckets = [0usize; 24];
        for (at, _) in trades {
            buckets[at.hour() as usize] += 1;
        }
        let mut best_hour = 0usize;
        let mut best_count = 0usize;
        for (hour, &count) in buckets.iter().enumerate() {
            // Strict comparison keeps the earliest hour on ties.
            if count > best_count {
                best_hour = hour;
                best_count = count;
            }
        }

        InsightData::new(
            InsightKind::MostActiveHour,
            InsightValue::Hour(best_hour as u32),
            description,
        )
        .with_info(format!(
            "{best_count} trades between {best_hour:02}:00 and {best_hour:02}:59"
        ))
    }

    /// The most frequent non-empty setup tag; first-seen order on ties.
    fn favorite_setup(&self, trades: &[(DateTime<Utc>, &Trade)]) -> InsightData {
        let description = "The setup traded most often this month";
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, trade) in trades {
            if let Some(setup) = trade.setup.as_deref() {
                if !counts.contains_key(setup) {
                    order.push(setup);
                }
                *counts.entry(setup).or_insert(0) += 1;
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for setup in order {
            let count = counts[setup];
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((setup, count));
            }
        }

        match best {
            Some((setup, count)) => InsightData::new(
                InsightKind::FavoriteSetup,
                InsightValue::Text(setup.to_string()),
                description,
            )
            .with_info(format!("{count} trades")),
            None => InsightData::new(
                InsightKind::FavoriteSetup,
                InsightValue::NotEnoughData,
                description,
            ),
        }
    }

    /// Mean holding time over trades with both timestamps, exit after entry.
    fn average_holding_time(&self, trades: &[(DateTime<Utc>, &Trade)]) -> InsightData {
        let description = "Average time between opening and closing a position";
        let held: Vec<i64> = trades
            .iter()
            .filter_map(|(_, t)| {
                let entry = t.entry_time?;
                let exit = t.exit_time?;
                (exit > entry).then(|| (exit - entry).num_seconds())
            })
            .collect();

        if held.is_empty() {
            return InsightData::new(
                InsightKind::AverageHoldingTime,
                InsightValue::NotEnoughData,
                description,
            );
        }

        let avg_secs = held.iter().sum::<i64>() / held.len() as i64;
        InsightData::new(
            InsightKind::AverageHoldingTime,
            InsightValue::Duration(std::time::Duration::from_secs(avg_secs as u64)),
            description,
        )
    }

    /// The emotions with the strongest and weakest average trade results.
    /// An emotion participates only with enough entries behind it and at
    /// least one valid trade to average over.
    fn mood_performance(&self, scoped: &[&JournalEntry]) -> InsightData {
        let description = "How journaled emotions lined up with trade results";

        struct Tally {
            entries: usize,
            pnl: Decimal,
            valid_trades: usize,
        }

        let mut order: Vec<&str> = Vec::new();
        let mut tallies: HashMap<&str, Tally> = HashMap::new();
        for entry in scoped {
            let Some(emotion) = entry.emotion.as_deref() else {
                continue;
            };
            if !tallies.contains_key(emotion) {
                order.push(emotion);
            }
            let tally = tallies.entry(emotion).or_insert(Tally {
                entries: 0,
                pnl: Decimal::ZERO,
                valid_trades: 0,
            });
            tally.entries += 1;
            for pnl in entry.trades.iter().filter_map(|t| t.pnl) {
                tally.pnl += pnl;
                tally.valid_trades += 1;
            }
        }

        let mut best: Option<(&str, Decimal)> = None;
        let mut worst: Option<(&str, Decimal)> = None;
        for emotion in order {
            let tally = &tallies[emotion];
            if tally.entries < self.settings.min_emotion_sample || tally.valid_trades == 0 {
                continue;
            }
            let mean = (tally.pnl / Decimal::from(tally.valid_trades)).round_dp(2);
            if best.is_none_or(|(_, m)| mean > m) {
                best = Some((emotion, mean));
            }
            if worst.is_none_or(|(_, m)| mean < m) {
                worst = Some((emotion, mean));
            }
        }

        match (best, worst) {
            (Some((best_emotion, best_mean)), Some((worst_emotion, worst_mean))) => {
                let card = InsightData::new(
                    InsightKind::MoodPerformance,
                    InsightValue::Text(best_emotion.to_string()),
                    description,
                );
                if best_emotion == worst_emotion {
                    card.with_info(format!("average P&L {best_mean}"))
                } else {
                    card.with_info(format!(
                        "average P&L {best_mean}; toughest emotion: {worst_emotion} ({worst_mean})"
                    ))
                }
            }
            _ => InsightData::new(
                InsightKind::MoodPerformance,
                InsightValue::NotEnoughData,
                description,
            ),
        }
    }

    /// Whether any single day of the month crossed the trade-count threshold.
    fn overtrading(&self, trades: &[(DateTime<Utc>, &Trade)]) -> InsightData {
        let description = "Whether any single day crossed the overtrading threshold";
        let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
        for (at, _) in trades {
            *per_day.entry(at.date_naive()).or_insert(0) += 1;
        }
        let busiest = per_day.values().copied().max().unwrap_or(0);
        let flag = busiest > self.settings.overtrading_daily_threshold;

        InsightData::new(InsightKind::Overtrading, InsightValue::Flag(flag), description)
            .with_info(format!(
                "busiest day: {busiest} trades (threshold {})",
                self.settings.overtrading_daily_threshold
            ))
    }

    /// Day-of-month x emotion grid; pure presentation payload.
    fn emotional_heatmap(&self, scoped: &[&JournalEntry]) -> InsightData {
        let description = "Entries per emotion per day of the month";
        let mut cells: std::collections::BTreeMap<(u32, String), usize> =
            std::collections::BTreeMap::new();
        for entry in scoped {
            if let Some(emotion) = entry.emotion.as_deref() {
                *cells
                    .entry((entry.created_at.day(), emotion.to_string()))
                    .or_insert(0) += 1;
            }
        }
        let cells: Vec<HeatmapCell> = cells
            .into_iter()
            .map(|((day, emotion), intensity)| HeatmapCell {
                day,
                emotion,
                intensity,
            })
            .collect();

        InsightData::new(
            InsightKind::EmotionalHeatmap,
            InsightValue::Heatmap(cells),
            description,
        )
    }
}

/// The `[start, end)` window covering one calendar month.
fn month_interval(month: u32, year: i32) -> Result<Interval, InsightError> {
    if !(1..=12).contains(&month) {
        return Err(InsightError::InvalidMonth(month));
    }
    let start = Utc
        .with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or(InsightError::InvalidMonth(month))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or(InsightError::InvalidMonth(month))?;
    Ok((start, end))
}
