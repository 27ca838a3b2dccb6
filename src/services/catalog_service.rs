use std::collections::BTreeMap;
use tracing::{info, warn};
use crate::api::openexchangerates::OpenExchangeRatesClient;
use crate::models::Catalog;

/// Listing shipped with the binary, used when the API cannot be reached
const BUNDLED_CURRENCIES: &str = include_str!("../../data/currencies.json");

/// Load the catalog from the API, falling back to the bundled listing
pub async fn load_catalog(client: &OpenExchangeRatesClient) -> Result<Catalog, String> {
    let listing = match client.get_currencies().await {
        Ok(listing) if !listing.is_empty() => {
            info!("Fetched {} currencies from the exchange rates API", listing.len());
            listing
        }
        Ok(_) => {
            warn!("Exchange rates API returned an empty currency listing, using bundled list");
            bundled_listing()?
        }
        Err(e) => {
            warn!("Failed to fetch currency listing, using bundled list: {}", e);
            bundled_listing()?
        }
    };

    catalog_from_listing(&listing)
}

fn bundled_listing() -> Result<BTreeMap<String, String>, String> {
    serde_json::from_str(BUNDLED_CURRENCIES)
        .map_err(|e| format!("Bundled currency listing is malformed: {}", e))
}

fn catalog_from_listing(listing: &BTreeMap<String, String>) -> Result<Catalog, String> {
    let (catalog, skipped) = Catalog::from_listing(listing);

    if !skipped.is_empty() {
        warn!("Skipped {} currencies with unusable codes: {:?}", skipped.len(), skipped);
    }
    if catalog.is_empty() {
        return Err("Currency catalog is empty".to_string());
    }

    Ok(catalog)
}
