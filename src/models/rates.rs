//! Exchange rate snapshot models

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use super::currency::CurrencyCode;

/// One snapshot of rates, all relative to `base` (USD for openexchangerates)
#[derive(Debug, Clone)]
pub struct ExchangeRates {
    pub base: CurrencyCode,
    pub timestamp: DateTime<Utc>,
    pub rates: HashMap<CurrencyCode, f64>,
}

impl ExchangeRates {
    /// Units of `code` per one unit of the base currency
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        if code == &self.base {
            return Some(1.0);
        }
        self.rates.get(code).copied()
    }

    /// Units of `to` per one unit of `from`
    pub fn cross_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<f64> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;

        if from_rate <= 0.0 || !from_rate.is_finite() || !to_rate.is_finite() {
            return None;
        }

        Some(to_rate / from_rate)
    }
}

/// Converted value for one active currency
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRow {
    pub code: CurrencyCode,
    pub is_focused: bool,
    /// `None` when no rate is known for this currency
    pub amount: Option<f64>,
    /// Value of one unit of the focused currency
    pub hint: Option<f64>,
}

/// Result of running conversions over the whole active set
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub focused: CurrencyCode,
    pub input: f64,
    pub rows: Vec<ConversionRow>,
    pub rates_timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn snapshot() -> ExchangeRates {
        let mut rates = HashMap::new();
        rates.insert(code("EUR"), 0.5);
        rates.insert(code("JPY"), 100.0);
        rates.insert(code("BAD"), 0.0);
        ExchangeRates {
            base: code("USD"),
            timestamp: Utc::now(),
            rates,
        }
    }

    #[test]
    fn test_base_rate_is_one_even_if_missing() {
        assert_eq!(snapshot().rate(&code("USD")), Some(1.0));
    }

    #[test]
    fn test_cross_rate() {
        let rates = snapshot();
        assert_eq!(rates.cross_rate(&code("EUR"), &code("JPY")), Some(200.0));
        assert_eq!(rates.cross_rate(&code("USD"), &code("EUR")), Some(0.5));
        assert_eq!(rates.cross_rate(&code("EUR"), &code("GBP")), None);
    }

    #[test]
    fn test_cross_rate_from_zero_is_none() {
        assert_eq!(snapshot().cross_rate(&code("BAD"), &code("EUR")), None);
    }
}
