use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};
use crate::api::openexchangerates::OpenExchangeRatesClient;
use crate::models::ExchangeRates;

/// Last rate snapshot plus how long it may be served before refreshing
#[derive(Debug)]
pub struct RatesCache {
    snapshot: Option<ExchangeRates>,
    max_age: Duration,
}

impl RatesCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            snapshot: None,
            max_age,
        }
    }

    pub fn snapshot(&self) -> Option<&ExchangeRates> {
        self.snapshot.as_ref()
    }

    pub fn store(&mut self, rates: ExchangeRates) {
        self.snapshot = Some(rates);
    }

    /// Age of the snapshot relative to `now`, if there is one
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.snapshot.as_ref().map(|rates| now - rates.timestamp)
    }

    /// No snapshot, or one older than the max age
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.age(now) {
            Some(age) => age > self.max_age,
            None => true,
        }
    }
}

/// Return current rates, refreshing from the API when the cache is stale.
///
/// A failed refresh falls back to the stale snapshot when one exists.
pub async fn get_rates(
    client: &OpenExchangeRatesClient,
    cache: &RwLock<RatesCache>,
) -> Result<ExchangeRates, String> {
    {
        let cache = cache.read().await;
        if !cache.is_stale(Utc::now()) {
            if let Some(rates) = cache.snapshot() {
                return Ok(rates.clone());
            }
        }
    }

    refresh_rates(client, cache).await
}

/// Fetch rates unconditionally and store them
pub async fn refresh_rates(
    client: &OpenExchangeRatesClient,
    cache: &RwLock<RatesCache>,
) -> Result<ExchangeRates, String> {
    let fetched = client
        .get_latest_rates()
        .await
        .and_then(|response| response.into_rates());

    let mut cache = cache.write().await;
    match fetched {
        Ok(rates) => {
            info!(
                "Loaded {} exchange rates (base {}, as of {})",
                rates.rates.len(),
                rates.base,
                rates.timestamp
            );
            cache.store(rates.clone());
            Ok(rates)
        }
        Err(e) => match cache.snapshot() {
            Some(stale) => {
                warn!("Failed to refresh exchange rates, serving snapshot from {}: {}", stale.timestamp, e);
                Ok(stale.clone())
            }
            None => Err(format!("Exchange rates are unavailable: {}", e)),
        },
    }
}

/// Human readable age such as "2h 5m" or "40s"
pub fn format_age(age: Duration) -> String {
    let seconds = age.num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}
