use crate::RiskManager;
use crate::error::RiskError;
use crate::pips::{pip_size, pip_value};
use crate::profile::TradeRiskProfile;
use configuration::RiskSettings;
use core_types::Trade;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A concrete `RiskManager` backed by the fixed pip-value table.
///
/// Position risk is measured from the trader's own stop placement: the
/// distance between entry and stop, converted to pips, priced by the
/// instrument's pip value, and scaled by the lot size.
#[derive(Debug, Clone)]
pub struct PipRiskManager {
    params: RiskSettings,
}

impl PipRiskManager {
    /// Creates a new `PipRiskManager` with the given configuration parameters.
    pub fn new(params: RiskSettings) -> Result<Self, RiskError> {
        // Validate that risk parameters are logical.
        if params.default_account_balance <= dec!(0) {
            return Err(RiskError::InvalidParameters(
                "default_account_balance must be greater than 0".to_string(),
            ));
        }
        if params.risk_limit_pct <= dec!(0) {
            return Err(RiskError::InvalidParameters(
                "risk_limit_pct must be greater than 0".to_string(),
            ));
        }
        if params.default_instrument.trim().is_empty() {
            return Err(RiskError::InvalidParameters(
                "default_instrument must not be empty".to_string(),
            ));
        }
        Ok(Self { params })
    }

    /// The core sizing math over already-resolved inputs.
    ///
    /// `recommended_lot_size` is the size that would have risked exactly 1%
    /// of the balance at the same stop distance.
    pub fn assess(
        &self,
        lot_size: Decimal,
        stop_loss_distance_pips: Decimal,
        account_balance: Decimal,
        instrument: &str,
    ) -> TradeRiskProfile {
        let pip_value = pip_value(instrument);
        let risk_amount = lot_size * stop_loss_distance_pips * pip_value;
        let actual_risk_pct = (risk_amount / account_balance * dec!(100)).round_dp(2);
        let recommended_lot_size =
            ((dec!(0.01) * account_balance) / (stop_loss_distance_pips * pip_value)).round_dp(2);

        TradeRiskProfile {
            risk_amount,
            actual_risk_pct,
            is_within_limit: actual_risk_pct <= self.params.risk_limit_pct,
            recommended_lot_size,
            used_default_balance: false,
            used_default_instrument: false,
        }
    }
}

impl RiskManager for PipRiskManager {
    /// Profiles one trade, failing closed when the stop-loss, quantity, or
    /// entry price is missing. Documented defaults cover only the account
    /// balance and the instrument, and their use is flagged on the profile.
    fn profile_trade(
        &self,
        trade: &Trade,
        account_balance: Option<Decimal>,
    ) -> Option<TradeRiskProfile> {
        let stop_loss = trade.stop_loss?;
        let quantity = trade.quantity?;
        let entry_price = trade.entry_price?;

        let (balance, used_default_balance) = match account_balance {
            Some(balance) if balance > Decimal::ZERO => (balance, false),
            // A non-positive caller balance is a data problem, not a gap the
            // default should paper over.
            Some(_) => return None,
            None => (self.params.default_account_balance, true),
        };
        let (instrument, used_default_instrument) = if trade.symbol.is_empty() {
            (self.params.default_instrument.as_str(), true)
        } else {
            (trade.symbol.as_str(), false)
        };

        let distance_pips = (entry_price - stop_loss).abs() / pip_size(instrument);
        if distance_pips.is_zero() {
            return None;
        }

        let mut profile = self.assess(quantity, distance_pips, balance, instrument);
        profile.used_default_balance = used_default_balance;
        profile.used_default_instrument = used_default_instrument;
        Some(profile)
    }

    /// Aggregate risk tolerance over a trade set, starting from a base score
    /// of 50 and clamped to [0, 100].
    ///
    /// The average risk percentage moves the score (conservative sizing down,
    /// aggressive sizing up), and high variance across trades adds a further
    /// penalty: inconsistent sizing signals higher effective risk tolerance.
    /// Trades with no computable profile are excluded entirely; with zero
    /// eligible trades the base score is returned unmodified.
    fn tolerance_score(&self, trades: &[Trade], account_balance: Option<Decimal>) -> Decimal {
        let base = dec!(50);
        let pcts: Vec<Decimal> = trades
            .iter()
            .filter_map(|t| self.profile_trade(t, account_balance))
            .map(|p| p.actual_risk_pct)
            .collect();
        if pcts.is_empty() {
            return base;
        }

        let n = Decimal::from(pcts.len());
        let mean = pcts.iter().sum::<Decimal>() / n;
        let mut score = base
            + if mean <= dec!(1) {
                dec!(-10)
            } else if mean <= dec!(2) {
                dec!(10)
            } else {
                dec!(20)
            };

        let variance = pcts
            .iter()
            .map(|p| (*p - mean) * (*p - mean))
            .sum::<Decimal>()
            / n;
        if variance > dec!(2) {
            score += dec!(15);
        }

        let score = score.clamp(Decimal::ZERO, dec!(100));
        tracing::debug!(%score, eligible = pcts.len(), "computed risk tolerance score");
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn manager() -> PipRiskManager {
        PipRiskManager::new(RiskSettings::default()).unwrap()
    }

    fn sized_trade(symbol: &str, entry: Decimal, stop: Decimal, lots: Decimal) -> Trade {
        Trade {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            direction: core_types::TradeDirection::Buy,
            entry_price: Some(entry),
            exit_price: None,
            entry_time: None,
            exit_time: None,
            quantity: Some(lots),
            stop_loss: Some(stop),
            take_profit: None,
            pnl: Some(dec!(0)),
            setup: None,
            screenshots: Vec::new(),
        }
    }

    #[test]
    fn twenty_pip_stop_on_a_standard_lot() {
        // Balance 10000, lot 1, 20 pips on EUR/USD (pip value 10).
        let profile = manager().assess(dec!(1), dec!(20), dec!(10000), "EUR/USD");
        assert_eq!(profile.risk_amount, dec!(200));
        assert_eq!(profile.actual_risk_pct, dec!(2.00));
        assert!(!profile.is_within_limit);
        assert_eq!(profile.recommended_lot_size, dec!(0.50));
    }

    #[test]
    fn profile_derives_pip_distance_from_prices() {
        // 1.1000 -> 1.0980 is 20 pips on a 0.0001-pip instrument.
        let trade = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0980), dec!(1));
        let profile = manager().profile_trade(&trade, Some(dec!(10000))).unwrap();
        assert_eq!(profile.risk_amount, dec!(200));
        assert_eq!(profile.actual_risk_pct, dec!(2.00));
        assert!(!profile.used_default_balance);
        assert!(!profile.used_default_instrument);
    }

    #[test]
    fn fails_closed_without_a_stop_loss() {
        let mut trade = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0980), dec!(1));
        trade.stop_loss = None;
        assert!(manager().profile_trade(&trade, None).is_none());

        let mut trade = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0980), dec!(1));
        trade.quantity = None;
        assert!(manager().profile_trade(&trade, None).is_none());

        let mut trade = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0980), dec!(1));
        trade.entry_price = None;
        assert!(manager().profile_trade(&trade, None).is_none());
    }

    #[test]
    fn fails_closed_on_a_zero_stop_distance() {
        let trade = sized_trade("EUR/USD", dec!(1.1000), dec!(1.1000), dec!(1));
        assert!(manager().profile_trade(&trade, None).is_none());
    }

    #[test]
    fn defaults_are_flagged_on_the_profile() {
        let trade = sized_trade("", dec!(1.1000), dec!(1.0990), dec!(0.5));
        let profile = manager().profile_trade(&trade, None).unwrap();
        assert!(profile.used_default_balance);
        assert!(profile.used_default_instrument);
    }

    #[test]
    fn empty_trade_set_scores_the_unmodified_base() {
        assert_eq!(manager().tolerance_score(&[], None), dec!(50));
    }

    #[test]
    fn trades_without_profiles_leave_the_base_score() {
        let mut no_stop = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0980), dec!(1));
        no_stop.stop_loss = None;
        assert_eq!(manager().tolerance_score(&[no_stop], None), dec!(50));
    }

    #[test]
    fn conservative_sizing_lowers_the_score() {
        // 5 pips on 1 lot of EUR/USD against 10000 = 0.5% risk.
        let trade = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0995), dec!(1));
        let score = manager().tolerance_score(&[trade.clone(), trade], Some(dec!(10000)));
        assert_eq!(score, dec!(40));
    }

    #[test]
    fn moderate_sizing_raises_the_score() {
        // 15 pips on 1 lot = 1.5% risk: inside (1, 2].
        let trade = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0985), dec!(1));
        let score = manager().tolerance_score(&[trade], Some(dec!(10000)));
        assert_eq!(score, dec!(60));
    }

    #[test]
    fn inconsistent_sizing_adds_the_variance_penalty() {
        // 0.5% and 4.5% risk: mean 2.5 (> 2 -> +20), variance 4 (> 2 -> +15).
        let small = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0995), dec!(1));
        let large = sized_trade("EUR/USD", dec!(1.1000), dec!(1.0955), dec!(1));
        let score = manager().tolerance_score(&[small, large], Some(dec!(10000)));
        assert_eq!(score, dec!(85));
    }

    #[test]
    fn score_stays_clamped_to_the_scale() {
        let wild = sized_trade("EUR/USD", dec!(1.2000), dec!(1.0000), dec!(10));
        let score = manager().tolerance_score(&[wild], Some(dec!(1000)));
        assert!(score <= dec!(100) && score >= Decimal::ZERO);
    }

    #[test]
    fn nonsensical_parameters_are_rejected() {
        let mut params = RiskSettings::default();
        params.risk_limit_pct = dec!(0);
        assert!(matches!(
            PipRiskManager::new(params),
            Err(RiskError::InvalidParameters(_))
        ));
    }
}
