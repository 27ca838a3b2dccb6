use std::sync::Arc;
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tokio::sync::RwLock;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod db;
mod models;
mod services;
mod utils;

use api::openexchangerates::OpenExchangeRatesClient;
use config::Config;
use services::rates_service::RatesCache;
use services::session_service::{ActiveListStore, SessionStore};

struct Handler;

/// Per-user selection state
struct Sessions;

impl TypeMapKey for Sessions {
    type Value = Arc<SessionStore>;
}

/// Exchange rates API client
struct RatesApi;

impl TypeMapKey for RatesApi {
    type Value = Arc<OpenExchangeRatesClient>;
}

/// Last fetched exchange rates
struct RatesStore;

impl TypeMapKey for RatesStore {
    type Value = Arc<RwLock<RatesCache>>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["rate_board=debug", "serenity=warn"] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Invalid log directive {}: {}", directive, e),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("💱 Starting rate board...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let rates_client = Arc::new(OpenExchangeRatesClient::with_base_url(
        config.rates_app_id.clone(),
        config.rates_base_url.clone(),
    ));

    info!("Loading currency catalog...");
    let catalog = match services::catalog_service::load_catalog(&rates_client).await {
        Ok(catalog) => {
            info!("Currency catalog loaded with {} currencies", catalog.len());
            Arc::new(catalog)
        }
        Err(e) => {
            error!("Failed to load currency catalog: {}", e);
            return;
        }
    };

    // Database is optional: without it active lists last for the session only
    let pool = match &config.database_url {
        Some(url) => {
            info!("Initializing database...");
            match db::init_db(url).await {
                Ok(pool) => {
                    info!("Database initialized successfully");
                    Some(pool)
                }
                Err(e) => {
                    error!("Failed to initialize database: {}", e);
                    return;
                }
            }
        }
        None => {
            warn!("DATABASE_URL not set, active currencies will not be persisted");
            None
        }
    };

    let sessions = Arc::new(SessionStore::new(
        catalog,
        config.default_currencies.clone(),
        pool.map(|pool| Arc::new(pool) as Arc<dyn ActiveListStore>),
    ));
    let rates_cache = Arc::new(RwLock::new(RatesCache::new(chrono::Duration::minutes(
        config.rates_max_age_minutes,
    ))));

    // Warm the cache so the first conversion does not wait on the API
    if let Err(e) = services::rates_service::refresh_rates(&rates_client, &rates_cache).await {
        warn!("Starting without exchange rates: {}", e);
    }

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<Sessions>(sessions);
        data.insert::<RatesApi>(rates_client);
        data.insert::<RatesStore>(rates_cache);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
