//! Data models for the rate board
//!
//! Currencies, the catalog and active set they live in, and the result
//! structs handed from services to commands.

pub mod currency;
pub mod catalog;
pub mod active_set;
pub mod rates;
pub mod selection;

// Re-export commonly used types for convenience
pub use currency::{Currency, CurrencyCode};
pub use catalog::Catalog;
pub use active_set::ActiveSet;
pub use rates::{ExchangeRates, ConversionRow, ConversionResult};
pub use selection::{RemovedCurrency, CandidatePage};
