use std::collections::BTreeMap;
use reqwest::Client as HttpClient;
use super::models::{ApiError, ErrorResponse, LatestRatesResponse};
use crate::utils::rates_ratelimit::rate_limit_rates_api;
use tracing::{debug, warn};

/// openexchangerates.org client for the catalog listing and latest rates
pub struct OpenExchangeRatesClient {
    http_client: HttpClient,
    app_id: String,
    base_url: String,
}

impl OpenExchangeRatesClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://openexchangerates.org/api";

    /// Create a new client; `base_url` is usually `DEFAULT_BASE_URL`
    pub fn with_base_url(app_id: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            app_id,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn latest_url(&self) -> String {
        format!("{}/latest.json", self.base_url)
    }

    fn currencies_url(&self) -> String {
        format!("{}/currencies.json", self.base_url)
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|err| err.summary())
            .unwrap_or(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            429 => {
                warn!("Exchange rates API allowance exhausted: {}", message);
                ApiError::RateLimited(message)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        rate_limit_rates_api().await;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        Ok(response)
    }

    /// GET /latest.json?app_id=...
    ///
    /// Latest rates, all relative to USD.
    pub async fn get_latest_rates(&self) -> Result<LatestRatesResponse, ApiError> {
        debug!("Fetching latest exchange rates");
        let request = self
            .http_client
            .get(self.latest_url())
            .query(&[("app_id", self.app_id.as_str())]);

        self.send(request)
            .await?
            .json::<LatestRatesResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /currencies.json
    ///
    /// Every currency code the API knows with its display name. Needs no app id.
    pub async fn get_currencies(&self) -> Result<BTreeMap<String, String>, ApiError> {
        debug!("Fetching currency listing");
        let request = self.http_client.get(self.currencies_url());

        self.send(request)
            .await?
            .json::<BTreeMap<String, String>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = OpenExchangeRatesClient::with_base_url(
            "id".to_string(),
            "http://localhost:9000/api/".to_string(),
        );
        assert_eq!(client.latest_url(), "http://localhost:9000/api/latest.json");
        assert_eq!(client.currencies_url(), "http://localhost:9000/api/currencies.json");
    }
}
