use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the analytics engine.
///
/// Every field has a documented default, so a missing `config.toml` is a
/// fully supported deployment: the engine degrades to its built-in defaults
/// rather than refusing to start.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub risk: RiskSettings,
    pub insights: InsightSettings,
}

/// Parameters for per-trade risk profiling and the aggregate tolerance score.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskSettings {
    /// Account balance assumed when the caller does not supply one.
    pub default_account_balance: Decimal,
    /// Instrument assumed when a trade carries no symbol.
    pub default_instrument: String,
    /// The per-trade risk ceiling, as a percentage of account balance.
    /// 1 means a trade risking more than 1% is flagged as outside the limit.
    pub risk_limit_pct: Decimal,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            default_account_balance: dec!(10000),
            default_instrument: "EUR/USD".to_string(),
            risk_limit_pct: dec!(1),
        }
    }
}

/// Parameters for the monthly insight generator and the statistics engine.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InsightSettings {
    /// A single day with more trades than this is flagged as overtrading.
    pub overtrading_daily_threshold: usize,
    /// Minimum entries per emotion label before the mood-performance
    /// relation will surface that emotion.
    pub min_emotion_sample: usize,
    /// Minimum trades on an instrument before its win rate is considered
    /// statistically meaningful.
    pub min_pair_trades: usize,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            overtrading_daily_threshold: 5,
            min_emotion_sample: 2,
            min_pair_trades: 3,
        }
    }
}
