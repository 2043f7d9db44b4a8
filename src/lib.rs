//! # Journalyst
//!
//! The analytics core of a discretionary-trading journal: a pure, synchronous
//! library that turns raw journal records into derived statistics, risk
//! profiles, monthly "wrapped" insights, and throttled behavioral
//! notifications.
//!
//! The engine owns no storage, no clock, and no transport. Callers fetch the
//! record collection themselves and inject a [`ClockSnapshot`] wherever
//! "today" or "the current hour" matters, which keeps every computation
//! deterministic and trivially safe to run concurrently on independent
//! snapshots.

use rust_decimal::Decimal;

// Re-export the public surface of the member crates.
pub use analytics::{
    DerivedStatistics, EmotionTrendPoint, Interval, MistakeCount, PairStats, StatsEngine,
    StatsError, emotion_score,
};
pub use configuration::{Config, ConfigError, InsightSettings, RiskSettings, load_config};
pub use core_types::{
    JournalEntry, Notification, Outcome, SessionType, Severity, Trade, TradeDirection,
};
pub use insights::{
    HeatmapCell, InsightData, InsightError, InsightKind, InsightValue, MonthlyInsightGenerator,
};
pub use normalizer::{RawEntry, RawTrade, entries_from_json, normalize_entries};
pub use notifier::{
    ClockSnapshot, Cooldown, JournalSnapshot, NotificationEngine, NotificationRule,
};
pub use risk::{PipRiskManager, RiskError, RiskManager, TradeRiskProfile};

/// Initializes the global tracing subscriber with env-filter support.
///
/// Intended for binaries and test harnesses embedding the library; calling it
/// twice is harmless.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    tracing::debug!("journalyst tracing initialized");
}

/// One-stop wiring of the engine components for callers that don't need the
/// individual pieces.
pub struct JournalAnalyzer {
    stats: StatsEngine,
    risk: PipRiskManager,
    insights: MonthlyInsightGenerator,
    notifier: NotificationEngine,
}

impl JournalAnalyzer {
    pub fn new(config: Config) -> Result<Self, RiskError> {
        Ok(Self {
            stats: StatsEngine::with_min_pair_trades(config.insights.min_pair_trades),
            risk: PipRiskManager::new(config.risk)?,
            insights: MonthlyInsightGenerator::new(config.insights),
            notifier: NotificationEngine::with_default_rules(),
        })
    }

    /// Derives the statistics projection, optionally restricted to a window.
    pub fn statistics(
        &self,
        entries: &[JournalEntry],
        interval: Option<Interval>,
    ) -> Result<DerivedStatistics, StatsError> {
        self.stats.derive(entries, interval)
    }

    /// The "wrapped" insight cards for one calendar month.
    pub fn monthly_insights(
        &self,
        entries: &[JournalEntry],
        month: u32,
        year: i32,
    ) -> Result<Vec<InsightData>, InsightError> {
        self.insights.generate(entries, month, year)
    }

    /// Risk profiles for every trade that carries enough data to compute one.
    pub fn risk_profiles(
        &self,
        entries: &[JournalEntry],
        account_balance: Option<Decimal>,
    ) -> Vec<(Trade, TradeRiskProfile)> {
        entries
            .iter()
            .flat_map(|e| e.trades.iter())
            .filter_map(|t| {
                self.risk
                    .profile_trade(t, account_balance)
                    .map(|p| (t.clone(), p))
            })
            .collect()
    }

    /// The aggregate risk-tolerance score over the whole journal.
    pub fn risk_tolerance(
        &self,
        entries: &[JournalEntry],
        account_balance: Option<Decimal>,
    ) -> Decimal {
        let trades: Vec<Trade> = entries
            .iter()
            .flat_map(|e| e.trades.iter().cloned())
            .collect();
        self.risk.tolerance_score(&trades, account_balance)
    }

    /// New notifications to append to the caller's log.
    pub fn notifications(
        &self,
        entries: &[JournalEntry],
        existing: &[Notification],
        clock: &ClockSnapshot,
    ) -> Vec<Notification> {
        let snapshot = JournalSnapshot::from_entries(entries, clock);
        self.notifier.evaluate(&snapshot, existing, clock)
    }
}
