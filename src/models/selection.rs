//! Selection command models

use super::currency::Currency;

/// A currency taken out of the active set, remembered so it can be restored
/// at its old position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCurrency {
    pub currency: Currency,
    pub position: usize,
}

/// One page of selectable candidates
#[derive(Debug)]
pub struct CandidatePage {
    pub query: Option<String>,
    pub entries: Vec<Currency>,
    /// 1-based list number of the first entry
    pub first_index: usize,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}
