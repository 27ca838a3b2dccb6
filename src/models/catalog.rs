//! The universe of selectable currencies

use std::collections::BTreeMap;
use super::currency::{Currency, CurrencyCode};

/// Every currency the bot knows about, keyed by code.
/// Loaded once at start-up and shared read-only between sessions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    currencies: BTreeMap<CurrencyCode, Currency>,
}

impl Catalog {
    pub fn new(currencies: impl IntoIterator<Item = Currency>) -> Self {
        let currencies = currencies
            .into_iter()
            .map(|currency| (currency.code.clone(), currency))
            .collect();
        Self { currencies }
    }

    /// Build a catalog from a `code -> name` listing (the format served by
    /// `currencies.json`). Entries with unusable codes are skipped and
    /// returned alongside the catalog so the caller can log them.
    pub fn from_listing(listing: &BTreeMap<String, String>) -> (Self, Vec<String>) {
        let mut skipped = Vec::new();
        let mut currencies = Vec::with_capacity(listing.len());

        for (code, name) in listing {
            match CurrencyCode::parse(code) {
                Ok(code) => currencies.push(Currency::new(code, name.trim())),
                Err(_) => skipped.push(code.clone()),
            }
        }

        (Self::new(currencies), skipped)
    }

    pub fn get(&self, code: &CurrencyCode) -> Option<&Currency> {
        self.currencies.get(code)
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.currencies.contains_key(code)
    }

    /// Iterate in code order
    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.values()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}
