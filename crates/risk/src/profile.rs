use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The position-risk profile of a single trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRiskProfile {
    /// Money at risk between entry and stop, in account currency.
    pub risk_amount: Decimal,
    /// `risk_amount` as a percentage of the account balance.
    pub actual_risk_pct: Decimal,
    /// Whether the trade stays inside the configured per-trade risk ceiling.
    pub is_within_limit: bool,
    /// The lot size that would have risked exactly 1% of the balance,
    /// rounded to 2 decimal places.
    pub recommended_lot_size: Decimal,
    /// The configured default balance filled in for a missing caller value.
    pub used_default_balance: bool,
    /// The configured default instrument filled in for a missing symbol.
    pub used_default_instrument: bool,
}
