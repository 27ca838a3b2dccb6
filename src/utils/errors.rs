use std::fmt;
use thiserror::Error;
use crate::models::CurrencyCode;

/// Where a currency lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Catalog,
    ActiveSet,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Catalog => f.write_str("currency catalog"),
            Lookup::ActiveSet => f.write_str("active list"),
        }
    }
}

/// Validation failures raised by the selection coordinator.
/// A failed operation never changes the active set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{code} is not in the {within}")]
    NotFound { code: CurrencyCode, within: Lookup },

    #[error("{0} is already in your active list")]
    AlreadyActive(CurrencyCode),

    #[error("There is no removed currency to restore")]
    NothingToUndo,

    #[error("Position {position} is out of range (list has {len} entries)")]
    InvalidPosition { position: usize, len: usize },
}

/// Rejected amount input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount cannot be empty")]
    Empty,

    #[error("Amount contains an invalid character: '{0}'")]
    InvalidCharacter(char),

    #[error("Amount can only contain one decimal separator")]
    MultipleSeparators,

    #[error("Amount can have at most {max} digits before the decimal separator")]
    TooManyIntegerDigits { max: usize },

    #[error("Amount can have at most {max} digits after the decimal separator")]
    TooManyFractionDigits { max: usize },
}

/// Extract clean error message from database error strings
///
/// Removes technical error codes and prefixes like:
/// "error returned from database: 1146 (42S02): Table 'rates.active_currency' doesn't exist"
///
/// Returns only the meaningful error message:
/// "Table 'rates.active_currency' doesn't exist"
pub fn extract_clean_error(error_msg: &str) -> String {
    if error_msg.contains("error returned from database:") {
        // Find the last colon, everything after it is the actual error message
        if let Some(last_colon) = error_msg.rfind(": ") {
            error_msg[last_colon + 2..].trim().to_string()
        } else {
            error_msg.to_string()
        }
    } else {
        error_msg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_clean_error_strips_database_prefix() {
        let raw = "Database error: error returned from database: 1146 (42S02): Table 'rates.active_currency' doesn't exist";
        assert_eq!(extract_clean_error(raw), "Table 'rates.active_currency' doesn't exist");
    }

    #[test]
    fn test_extract_clean_error_passes_other_messages() {
        assert_eq!(extract_clean_error("EUR is not in the active list"), "EUR is not in the active list");
    }

    #[test]
    fn test_selection_error_messages() {
        let code = CurrencyCode::parse("EUR").unwrap();
        let err = SelectionError::NotFound { code: code.clone(), within: Lookup::ActiveSet };
        assert_eq!(err.to_string(), "EUR is not in the active list");
        assert_eq!(
            SelectionError::AlreadyActive(code).to_string(),
            "EUR is already in your active list"
        );
    }
}
