use rust_decimal::Decimal;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, InsightSettings, RiskSettings};

/// Loads the engine configuration from an optional `config.toml` file.
///
/// This function is the primary entry point for this crate. A missing file is
/// not an error, since every setting has a built-in default, but a present
/// file that fails to parse or validate is surfaced to the caller.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`.
        // `required(false)` lets deployments run entirely on defaults.
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects configurations the engine cannot meaningfully run with.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.risk.default_account_balance <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "risk.default_account_balance must be positive".to_string(),
        ));
    }
    if config.risk.risk_limit_pct <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "risk.risk_limit_pct must be positive".to_string(),
        ));
    }
    if config.insights.overtrading_daily_threshold == 0 {
        return Err(ConfigError::ValidationError(
            "insights.overtrading_daily_threshold must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.risk.default_account_balance, dec!(10000));
        assert_eq!(config.risk.default_instrument, "EUR/USD");
        assert_eq!(config.risk.risk_limit_pct, dec!(1));
        assert_eq!(config.insights.overtrading_daily_threshold, 5);
        assert_eq!(config.insights.min_emotion_sample, 2);
        assert_eq!(config.insights.min_pair_trades, 3);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn zero_balance_rejected() {
        let mut config = Config::default();
        config.risk.default_account_balance = Decimal::ZERO;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
