use std::collections::BTreeMap;

/// Convert `amount` to the reference currency.
///
/// Unknown currency codes pass the amount through unchanged: the extracts
/// occasionally carry codes outside the rate table, and a missing value
/// here would cascade into every derived metric downstream. Total — never
/// fails, never returns a sentinel.
pub fn to_reference_currency(amount: f64, currency_code: &str, rates: &BTreeMap<String, f64>) -> f64 {
    match rates.get(currency_code) {
        Some(rate) => amount * rate,
        None => amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn known_currency_applies_rate() {
        let rates = EngineConfig::default().rates;
        assert_eq!(to_reference_currency(100.0, "USD", &rates), 93.0);
        assert_eq!(to_reference_currency(100.0, "GBP", &rates), 120.0);
    }

    #[test]
    fn unknown_currency_passes_through() {
        let rates = EngineConfig::default().rates;
        assert_eq!(to_reference_currency(100.0, "ZZZ", &rates), 100.0);
        assert_eq!(to_reference_currency(100.0, "", &rates), 100.0);
    }

    #[test]
    fn reference_currency_itself_passes_through() {
        // EUR is deliberately absent from the rate table.
        let rates = EngineConfig::default().rates;
        assert_eq!(to_reference_currency(42.5, "EUR", &rates), 42.5);
    }

    #[test]
    fn zero_and_negative_amounts() {
        let rates = EngineConfig::default().rates;
        assert_eq!(to_reference_currency(0.0, "USD", &rates), 0.0);
        assert_eq!(to_reference_currency(-50.0, "USD", &rates), -46.5);
    }
}
