use std::sync::Arc;
use tracing::debug;
use crate::models::{ActiveSet, Catalog, Currency, CurrencyCode, RemovedCurrency};
use crate::utils::errors::{Lookup, SelectionError};

/// Keeps one user's active set in sync with the shared catalog.
///
/// Candidates are the catalog entries that are not active. Every mutation
/// goes through here so the active set never holds a duplicate or a code
/// the catalog does not know.
#[derive(Debug, Clone)]
pub struct SelectionCoordinator {
    catalog: Arc<Catalog>,
    active: ActiveSet,
    focused: Option<CurrencyCode>,
    last_removed: Option<RemovedCurrency>,
}

impl SelectionCoordinator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            active: ActiveSet::new(),
            focused: None,
            last_removed: None,
        }
    }

    /// Rebuild a coordinator from stored codes, in order.
    /// Codes the catalog no longer knows, and repeats, are dropped and returned.
    pub fn restore(catalog: Arc<Catalog>, codes: &[CurrencyCode]) -> (Self, Vec<CurrencyCode>) {
        let mut coordinator = Self::new(catalog);
        let mut dropped = Vec::new();

        for code in codes {
            if coordinator.activate(code).is_err() {
                dropped.push(code.clone());
            }
        }
        coordinator.last_removed = None;

        (coordinator, dropped)
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    pub fn focused(&self) -> Option<&Currency> {
        let code = self.focused.as_ref()?;
        self.active.position(code).and_then(|i| self.active.get(i))
    }

    /// Catalog minus active set, ordered by display name then code
    pub fn available_candidates(&self) -> Vec<Currency> {
        let mut candidates: Vec<Currency> = self
            .catalog
            .iter()
            .filter(|currency| !self.active.contains(&currency.code))
            .cloned()
            .collect();

        candidates.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.code.cmp(&b.code))
        });
        candidates
    }

    /// Candidates whose code or name contains `query` (case-insensitive).
    /// A blank query matches everything.
    pub fn search_candidates(&self, query: &str) -> Vec<Currency> {
        let query = query.trim().to_lowercase();
        let candidates = self.available_candidates();

        if query.is_empty() {
            return candidates;
        }

        candidates
            .into_iter()
            .filter(|currency| {
                currency.code.as_str().to_lowercase().contains(&query)
                    || currency.name.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Append a catalog currency to the end of the active set
    pub fn activate(&mut self, code: &CurrencyCode) -> Result<&Currency, SelectionError> {
        let currency = self
            .catalog
            .get(code)
            .ok_or_else(|| SelectionError::NotFound {
                code: code.clone(),
                within: Lookup::Catalog,
            })?
            .clone();

        if !self.active.push(currency) {
            return Err(SelectionError::AlreadyActive(code.clone()));
        }
        debug!("Activated {} ({} active)", code, self.active.len());

        if self.focused.is_none() {
            self.focused = Some(code.clone());
        }
        self.last_removed = None;

        let index = self.active.len() - 1;
        Ok(&self.active.as_slice()[index])
    }

    /// Remove a currency from the active set, remembering it for undo
    pub fn deactivate(&mut self, code: &CurrencyCode) -> Result<RemovedCurrency, SelectionError> {
        let (position, currency) = self.active.remove(code).ok_or_else(|| SelectionError::NotFound {
            code: code.clone(),
            within: Lookup::ActiveSet,
        })?;
        debug!("Deactivated {} from position {}", code, position);

        if self.focused.as_ref() == Some(code) {
            self.focused = self.active.get(0).map(|c| c.code.clone());
        }

        let removed = RemovedCurrency { currency, position };
        self.last_removed = Some(removed.clone());
        Ok(removed)
    }

    /// Put the most recently removed currency back where it was
    pub fn undo_deactivate(&mut self) -> Result<RemovedCurrency, SelectionError> {
        let removed = self.last_removed.clone().ok_or(SelectionError::NothingToUndo)?;

        let position = self
            .active
            .insert(removed.position, removed.currency.clone())
            .ok_or_else(|| SelectionError::AlreadyActive(removed.currency.code.clone()))?;

        if self.focused.is_none() {
            self.focused = Some(removed.currency.code.clone());
        }
        self.last_removed = None;

        Ok(RemovedCurrency {
            currency: removed.currency,
            position,
        })
    }

    /// Move the entry at `from` to `to` (both zero-based)
    pub fn move_currency(&mut self, from: usize, to: usize) -> Result<(), SelectionError> {
        let len = self.active.len();
        for position in [from, to] {
            if position >= len {
                return Err(SelectionError::InvalidPosition { position, len });
            }
        }

        self.active.move_item(from, to);
        self.last_removed = None;
        Ok(())
    }

    /// Make an active currency the one amounts are typed in
    pub fn focus(&mut self, code: &CurrencyCode) -> Result<&Currency, SelectionError> {
        let index = self.active.position(code).ok_or_else(|| SelectionError::NotFound {
            code: code.clone(),
            within: Lookup::ActiveSet,
        })?;

        self.focused = Some(code.clone());
        Ok(&self.active.as_slice()[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(vec![
            Currency::new(code("USD"), "United States Dollar"),
            Currency::new(code("EUR"), "Euro"),
            Currency::new(code("JPY"), "Japanese Yen"),
            Currency::new(code("GBP"), "British Pound Sterling"),
        ]))
    }

    fn codes(currencies: &[Currency]) -> Vec<String> {
        currencies.iter().map(|c| c.code.to_string()).collect()
    }

    fn active_codes(coordinator: &SelectionCoordinator) -> Vec<String> {
        codes(coordinator.active().as_slice())
    }

    #[test]
    fn test_usd_eur_jpy_example() {
        let catalog = Arc::new(Catalog::new(vec![
            Currency::new(code("USD"), "United States Dollar"),
            Currency::new(code("EUR"), "Euro"),
            Currency::new(code("JPY"), "Japanese Yen"),
        ]));
        let mut coordinator = SelectionCoordinator::new(catalog);
        coordinator.activate(&code("USD")).unwrap();

        assert_eq!(codes(&coordinator.available_candidates()), vec!["EUR", "JPY"]);

        coordinator.activate(&code("EUR")).unwrap();
        assert_eq!(active_codes(&coordinator), vec!["USD", "EUR"]);

        let err = coordinator.activate(&code("EUR")).unwrap_err();
        assert_eq!(err, SelectionError::AlreadyActive(code("EUR")));
        assert_eq!(active_codes(&coordinator), vec!["USD", "EUR"]);
    }

    #[test]
    fn test_candidates_are_complement_without_duplicates() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        coordinator.activate(&code("JPY")).unwrap();
        coordinator.activate(&code("USD")).unwrap();

        let candidates = coordinator.available_candidates();
        let unique: HashSet<_> = candidates.iter().map(|c| c.code.clone()).collect();
        assert_eq!(unique.len(), candidates.len());
        assert_eq!(
            unique,
            [code("EUR"), code("GBP")].into_iter().collect::<HashSet<_>>()
        );
        for currency in &candidates {
            assert!(!coordinator.active().contains(&currency.code));
        }
    }

    #[test]
    fn test_candidates_sorted_by_name() {
        let coordinator = SelectionCoordinator::new(catalog());
        assert_eq!(
            codes(&coordinator.available_candidates()),
            vec!["GBP", "EUR", "JPY", "USD"]
        );
    }

    #[test]
    fn test_candidates_empty_when_all_active() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        for c in ["USD", "EUR", "JPY", "GBP"] {
            coordinator.activate(&code(c)).unwrap();
        }
        assert!(coordinator.available_candidates().is_empty());
    }

    #[test]
    fn test_activate_unknown_code() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        let err = coordinator.activate(&code("CHF")).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NotFound { code: code("CHF"), within: Lookup::Catalog }
        );
        assert!(coordinator.active().is_empty());
    }

    #[test]
    fn test_activate_then_deactivate_round_trip() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        coordinator.activate(&code("USD")).unwrap();
        coordinator.activate(&code("GBP")).unwrap();
        let before = coordinator.active().clone();

        coordinator.activate(&code("EUR")).unwrap();
        coordinator.deactivate(&code("EUR")).unwrap();

        assert_eq!(coordinator.active(), &before);
    }

    #[test]
    fn test_deactivate_inactive_code() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        coordinator.activate(&code("USD")).unwrap();

        let err = coordinator.deactivate(&code("EUR")).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NotFound { code: code("EUR"), within: Lookup::ActiveSet }
        );
        assert_eq!(active_codes(&coordinator), vec!["USD"]);
    }

    #[test]
    fn test_deactivate_preserves_order() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        for c in ["USD", "EUR", "JPY", "GBP"] {
            coordinator.activate(&code(c)).unwrap();
        }

        let removed = coordinator.deactivate(&code("EUR")).unwrap();
        assert_eq!(removed.position, 1);
        assert_eq!(active_codes(&coordinator), vec!["USD", "JPY", "GBP"]);
    }

    #[test]
    fn test_undo_restores_position() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        for c in ["USD", "EUR", "JPY"] {
            coordinator.activate(&code(c)).unwrap();
        }

        coordinator.deactivate(&code("EUR")).unwrap();
        let restored = coordinator.undo_deactivate().unwrap();

        assert_eq!(restored.position, 1);
        assert_eq!(active_codes(&coordinator), vec!["USD", "EUR", "JPY"]);
        assert_eq!(coordinator.undo_deactivate().unwrap_err(), SelectionError::NothingToUndo);
    }

    #[test]
    fn test_undo_of_only_currency_takes_focus() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        coordinator.activate(&code("JPY")).unwrap();

        coordinator.deactivate(&code("JPY")).unwrap();
        assert!(coordinator.active().is_empty());
        assert!(coordinator.focused().is_none());

        coordinator.undo_deactivate().unwrap();
        assert_eq!(active_codes(&coordinator), vec!["JPY"]);
        assert_eq!(coordinator.focused().unwrap().code, code("JPY"));
    }

    #[test]
    fn test_undo_cleared_by_later_mutation() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        coordinator.activate(&code("USD")).unwrap();
        coordinator.activate(&code("EUR")).unwrap();

        coordinator.deactivate(&code("EUR")).unwrap();
        coordinator.activate(&code("EUR")).unwrap();

        assert_eq!(coordinator.undo_deactivate().unwrap_err(), SelectionError::NothingToUndo);
        assert_eq!(active_codes(&coordinator), vec!["USD", "EUR"]);
    }

    #[test]
    fn test_focus_follows_removal() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        assert!(coordinator.focused().is_none());

        coordinator.activate(&code("USD")).unwrap();
        coordinator.activate(&code("EUR")).unwrap();
        assert_eq!(coordinator.focused().unwrap().code, code("USD"));

        coordinator.focus(&code("EUR")).unwrap();
        coordinator.deactivate(&code("EUR")).unwrap();
        assert_eq!(coordinator.focused().unwrap().code, code("USD"));

        // Undo does not take focus back
        coordinator.undo_deactivate().unwrap();
        assert_eq!(coordinator.focused().unwrap().code, code("USD"));

        assert!(coordinator.focus(&code("JPY")).is_err());
    }

    #[test]
    fn test_move_currency() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        for c in ["USD", "EUR", "JPY"] {
            coordinator.activate(&code(c)).unwrap();
        }

        coordinator.move_currency(2, 0).unwrap();
        assert_eq!(active_codes(&coordinator), vec!["JPY", "USD", "EUR"]);

        let err = coordinator.move_currency(0, 3).unwrap_err();
        assert_eq!(err, SelectionError::InvalidPosition { position: 3, len: 3 });
        assert_eq!(active_codes(&coordinator), vec!["JPY", "USD", "EUR"]);
    }

    #[test]
    fn test_search_candidates() {
        let mut coordinator = SelectionCoordinator::new(catalog());
        coordinator.activate(&code("EUR")).unwrap();

        assert_eq!(codes(&coordinator.search_candidates("pound")), vec!["GBP"]);
        assert_eq!(codes(&coordinator.search_candidates("jp")), vec!["JPY"]);
        assert!(coordinator.search_candidates("euro").is_empty());
        assert_eq!(coordinator.search_candidates("  ").len(), 3);
    }

    #[test]
    fn test_restore_drops_unknown_and_repeated_codes() {
        let stored = vec![code("EUR"), code("XXX"), code("USD"), code("EUR")];
        let (coordinator, dropped) = SelectionCoordinator::restore(catalog(), &stored);

        assert_eq!(active_codes(&coordinator), vec!["EUR", "USD"]);
        assert_eq!(dropped, vec![code("XXX"), code("EUR")]);
        assert_eq!(coordinator.focused().unwrap().code, code("EUR"));
    }
}
