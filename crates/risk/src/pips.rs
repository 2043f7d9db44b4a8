use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency value of one pip per standard lot for the given instrument.
///
/// The table covers the instruments the journal actually sees; anything
/// unknown falls back to 10, the value shared by all USD-quoted majors.
pub fn pip_value(instrument: &str) -> Decimal {
    match canonical(instrument).as_str() {
        "EUR/USD" | "GBP/USD" | "AUD/USD" | "NZD/USD" | "XAU/USD" => dec!(10),
        "USD/JPY" | "EUR/JPY" | "GBP/JPY" => dec!(9.09),
        "USD/CHF" => dec!(10.87),
        "USD/CAD" => dec!(7.69),
        _ => dec!(10),
    }
}

/// Minimum price movement that counts as one pip for the instrument.
/// JPY-quoted pairs tick in hundredths; everything else in ten-thousandths.
pub fn pip_size(instrument: &str) -> Decimal {
    if canonical(instrument).ends_with("/JPY") {
        dec!(0.01)
    } else {
        dec!(0.0001)
    }
}

fn canonical(instrument: &str) -> String {
    instrument.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_instruments_use_the_table() {
        assert_eq!(pip_value("EUR/USD"), dec!(10));
        assert_eq!(pip_value("usd/jpy"), dec!(9.09));
        assert_eq!(pip_value("USD/CAD"), dec!(7.69));
    }

    #[test]
    fn unknown_instruments_default_to_ten() {
        assert_eq!(pip_value("BTC/USDT"), dec!(10));
    }

    #[test]
    fn jpy_quotes_tick_in_hundredths() {
        assert_eq!(pip_size("USD/JPY"), dec!(0.01));
        assert_eq!(pip_size("EUR/USD"), dec!(0.0001));
    }
}
