use std::collections::HashMap;
use thiserror::Error;
use crate::api::openexchangerates::OpenExchangeRatesClient;
use crate::models::CurrencyCode;

const DEFAULT_CURRENCIES: &str = "USD,EUR";
const DEFAULT_RATES_MAX_AGE_MINUTES: i64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub rates_app_id: String,
    pub rates_base_url: String,
    pub database_url: Option<String>,
    pub default_currencies: Vec<CurrencyCode>,
    pub rates_max_age_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let rates_app_id = get("OPEN_EXCHANGE_RATES_APP_ID")
            .ok_or(ConfigError::Missing("OPEN_EXCHANGE_RATES_APP_ID"))?;
        let rates_base_url = get("OPEN_EXCHANGE_RATES_BASE_URL")
            .unwrap_or_else(|| OpenExchangeRatesClient::DEFAULT_BASE_URL.to_string());
        let database_url = get("DATABASE_URL");

        let default_currencies = parse_currency_list(
            &get("DEFAULT_CURRENCIES").unwrap_or_else(|| DEFAULT_CURRENCIES.to_string()),
        )?;

        let rates_max_age_minutes = match get("RATES_MAX_AGE_MINUTES") {
            Some(value) => {
                let minutes = value.parse::<i64>().map_err(|e| ConfigError::Invalid {
                    key: "RATES_MAX_AGE_MINUTES",
                    reason: e.to_string(),
                })?;
                if minutes <= 0 {
                    return Err(ConfigError::Invalid {
                        key: "RATES_MAX_AGE_MINUTES",
                        reason: "must be positive".to_string(),
                    });
                }
                minutes
            }
            None => DEFAULT_RATES_MAX_AGE_MINUTES,
        };

        Ok(Config {
            discord_token,
            rates_app_id,
            rates_base_url,
            database_url,
            default_currencies,
            rates_max_age_minutes,
        })
    }
}

fn parse_currency_list(value: &str) -> Result<Vec<CurrencyCode>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            CurrencyCode::parse(s).map_err(|reason| ConfigError::Invalid {
                key: "DEFAULT_CURRENCIES",
                reason,
            })
        })
        .collect()
}
