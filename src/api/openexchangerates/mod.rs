pub mod client;
pub mod models;

pub use client::OpenExchangeRatesClient;
pub use models::{ApiError, LatestRatesResponse};
