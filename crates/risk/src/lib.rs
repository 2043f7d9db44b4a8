//! # Journal Risk Analysis
//!
//! Per-trade position-risk profiling and an aggregate risk-tolerance score
//! derived from the trader's actual sizing behavior.
//!
//! The crate fails closed: a trade missing its stop-loss, quantity, or entry
//! price gets no profile at all and is excluded from aggregate scoring,
//! never defaulted to zero risk. Documented defaults exist only for the
//! account balance and the instrument, and using one is surfaced on the
//! resulting profile.

use core_types::Trade;
use rust_decimal::Decimal;

pub mod error;
pub mod pip_manager;
pub mod pips;
pub mod profile;

pub use error::RiskError;
pub use pip_manager::PipRiskManager;
pub use pips::{pip_size, pip_value};
pub use profile::TradeRiskProfile;

/// The seam between the journal and a concrete risk model.
pub trait RiskManager {
    /// Profiles one trade's position risk, or `None` when the trade lacks
    /// the fields the calculation needs (fail closed).
    fn profile_trade(
        &self,
        trade: &Trade,
        account_balance: Option<Decimal>,
    ) -> Option<TradeRiskProfile>;

    /// A single risk-tolerance score in [0, 100] over a trade set.
    fn tolerance_score(&self, trades: &[Trade], account_balance: Option<Decimal>) -> Decimal;
}
