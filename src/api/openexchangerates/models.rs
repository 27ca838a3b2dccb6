use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::{CurrencyCode, ExchangeRates};

/// Response from GET latest.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestRatesResponse {
    pub disclaimer: Option<String>,
    pub license: Option<String>,
    /// Unix seconds of the snapshot
    pub timestamp: i64,
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl LatestRatesResponse {
    /// Convert into a rate snapshot. Entries with unusable codes are dropped.
    pub fn into_rates(self) -> Result<ExchangeRates, ApiError> {
        let base = CurrencyCode::parse(&self.base)
            .map_err(|e| ApiError::DeserializationError(format!("Invalid base currency: {}", e)))?;

        let timestamp = DateTime::<Utc>::from_timestamp(self.timestamp, 0).ok_or_else(|| {
            ApiError::DeserializationError(format!("Invalid timestamp: {}", self.timestamp))
        })?;

        let rates = self
            .rates
            .into_iter()
            .filter_map(|(code, rate)| CurrencyCode::parse(&code).ok().map(|code| (code, rate)))
            .collect();

        Ok(ExchangeRates {
            base,
            timestamp,
            rates,
        })
    }
}

/// Error body returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<bool>,
    pub status: Option<u16>,
    pub message: Option<String>,
    pub description: Option<String>,
}

impl ErrorResponse {
    /// Prefer the human description, fall back to the short message
    pub fn summary(&self) -> Option<String> {
        self.description.clone().or_else(|| self.message.clone())
    }
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Missing or invalid app id
    Unauthorized(String),
    /// 403 Feature not available on this plan
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Monthly request allowance used up
    RateLimited(String),
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited(msg) => write!(f, "Rate Limited: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    const LATEST: &str = r#"{
        "disclaimer": "Usage subject to terms",
        "license": "https://openexchangerates.org/license",
        "timestamp": 1700000000,
        "base": "USD",
        "rates": { "EUR": 0.92, "JPY": 149.5, "??": 1.0 }
    }"#;

    #[test]
    fn test_latest_response_into_rates() {
        let response: LatestRatesResponse = serde_json::from_str(LATEST).unwrap();
        let rates = response.into_rates().unwrap();

        assert_eq!(rates.base.as_str(), "USD");
        assert_eq!(rates.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(rates.rates.len(), 2);
        assert_eq!(rates.rate(&CurrencyCode::parse("JPY").unwrap()), Some(149.5));
    }

    #[test]
    fn test_error_response_summary() {
        let body = r#"{"error": true, "status": 401, "message": "invalid_app_id", "description": "Invalid App ID provided."}"#;
        let err: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.summary().as_deref(), Some("Invalid App ID provided."));
    }
}
