use serde::Deserialize;
use serde_json::Value;

/// A journal entry exactly as the capture frontend recorded it.
///
/// Every field is optional and numerics are untyped: the frontend has
/// historically written numbers, numeric strings, and garbage into the same
/// columns, so the wire shape promises nothing. `normalize_entries` is the
/// single place that turns this into something the engine can trust.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntry {
    pub id: Option<String>,
    pub created_at: Option<String>,
    pub session_type: Option<String>,
    pub emotion: Option<String>,
    pub emotion_detail: Option<String>,
    pub notes: Option<String>,
    pub outcome: Option<String>,
    pub rules_followed: Vec<String>,
    pub mistakes: Vec<String>,
    pub pre_trading_activities: Vec<String>,
    pub trades: Vec<RawTrade>,
}

/// A trade as recorded by the capture frontend. See [`RawEntry`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTrade {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub direction: Option<String>,
    /// Number-or-string; coerced by the normalizer.
    pub entry_price: Option<Value>,
    pub exit_price: Option<Value>,
    pub entry_date: Option<String>,
    pub exit_date: Option<String>,
    pub quantity: Option<Value>,
    pub stop_loss: Option<Value>,
    pub take_profit: Option<Value>,
    pub pnl: Option<Value>,
    pub setup: Option<String>,
    pub screenshots: Vec<String>,
}
