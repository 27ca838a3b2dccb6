//! Ordered list of the currencies a user is tracking

use super::currency::{Currency, CurrencyCode};

/// Currencies in display order. Holds no duplicate codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    currencies: Vec<Currency>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.position(code).is_some()
    }

    pub fn position(&self, code: &CurrencyCode) -> Option<usize> {
        self.currencies.iter().position(|c| &c.code == code)
    }

    pub fn get(&self, index: usize) -> Option<&Currency> {
        self.currencies.get(index)
    }

    /// Append to the end. Returns false (and does nothing) on a duplicate code.
    pub fn push(&mut self, currency: Currency) -> bool {
        if self.contains(&currency.code) {
            return false;
        }
        self.currencies.push(currency);
        true
    }

    /// Insert at `index`, clamped to the end. Returns the index used, or
    /// `None` on a duplicate code.
    pub fn insert(&mut self, index: usize, currency: Currency) -> Option<usize> {
        if self.contains(&currency.code) {
            return None;
        }
        let index = index.min(self.currencies.len());
        self.currencies.insert(index, currency);
        Some(index)
    }

    /// Remove by code, keeping the order of the remaining entries
    pub fn remove(&mut self, code: &CurrencyCode) -> Option<(usize, Currency)> {
        let index = self.position(code)?;
        Some((index, self.currencies.remove(index)))
    }

    /// Move the entry at `from` so that it ends up at `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.currencies.len();
        if from >= len || to >= len {
            return false;
        }
        let currency = self.currencies.remove(from);
        self.currencies.insert(to, currency);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn as_slice(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}
