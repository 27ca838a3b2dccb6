pub mod help;
pub mod active;
pub mod add;
pub mod remove;
pub mod candidates;
pub mod reorder;
pub mod focus;
pub mod convert;
pub mod rates;

use std::sync::Arc;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::api::openexchangerates::OpenExchangeRatesClient;
use crate::models::{CurrencyCode, ExchangeRates};
use crate::services::rates_service::{self, RatesCache};
use crate::services::session_service::SessionStore;
use crate::utils::{check_cooldown, extract_clean_error};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const COMMAND_PREFIX: char = '$';

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    // Parse command and arguments
    let parts: Vec<&str> = msg.content.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return;
    };
    if !command.starts_with(COMMAND_PREFIX) {
        return;
    }
    let command = command.to_lowercase();

    let user_id = msg.author.id.get();
    if let Err((remaining, should_warn)) = check_cooldown(user_id, &command).await {
        if should_warn {
            let _ = msg.channel_id.send_message(
                ctx,
                CreateMessage::default().embed(
                    CreateEmbed::default()
                        .title("Command Cooldown")
                        .description(format!("⏳ Please wait {} seconds before using this command again.", remaining))
                        .color(0xffa500)
                )
            ).await;
        }
        return;
    }

    let result = match command.as_str() {
        "$help" => help::execute(ctx, msg).await,
        "$active" | "$list" => active::execute(ctx, msg).await,
        "$add" | "$activate" => add::execute(ctx, msg, args).await,
        "$remove" | "$rm" | "$deactivate" => remove::execute(ctx, msg, args).await,
        "$undo" => remove::execute_undo(ctx, msg).await,
        "$candidates" | "$search" => candidates::execute(ctx, msg, args).await,
        "$move" => reorder::execute(ctx, msg, args).await,
        "$focus" => focus::execute(ctx, msg, args).await,
        "$convert" | "$c" => convert::execute(ctx, msg, args).await,
        "$rates" => rates::execute(ctx, msg, args).await,
        _ => return,
    };
    debug!("Handled {} for user {}", command, user_id);

    if let Err(e) = result {
        warn!("Error executing command {}: {}", command, e);
        let user_message = user_error_message(&e);

        let embed = CreateEmbed::default()
            .title("Command Error")
            .description(user_message)
            .color(0xff0000);

        let _ = msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await;
    }
}

/// Message shown in the error embed for a failed command
fn user_error_message(error: &str) -> String {
    let clean_error = extract_clean_error(error);

    if error.contains("Rate Limited") {
        "⚠️ **Rate Limited**: The exchange rates API is busy. Please try again in a moment.".to_string()
    } else if error.contains("Request Error") {
        "⚠️ **Network Error**: Could not reach the exchange rates API. Please try again.".to_string()
    } else if !clean_error.is_empty() {
        format!("❌ {}", clean_error)
    } else {
        "❌ An error occurred while executing the command.".to_string()
    }
}

/// Send a single embed to the channel the message came from
pub async fn reply_embed(ctx: &Context, msg: &Message, embed: CreateEmbed) -> Result<(), String> {
    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Parse a currency code argument, with a usage hint on failure
pub fn parse_code_arg(arg: &str, usage: &str) -> Result<CurrencyCode, String> {
    CurrencyCode::parse(arg).map_err(|e| format!("{}\nUsage: `{}`", e, usage))
}

pub async fn get_sessions(ctx: &Context) -> Result<Arc<SessionStore>, String> {
    let data = ctx.data.read().await;
    data.get::<crate::Sessions>()
        .cloned()
        .ok_or("Sessions not initialized".to_string())
}

async fn get_rates_handles(
    ctx: &Context,
) -> Result<(Arc<OpenExchangeRatesClient>, Arc<RwLock<RatesCache>>), String> {
    let data = ctx.data.read().await;
    let client = data.get::<crate::RatesApi>()
        .cloned()
        .ok_or("Rates client not initialized".to_string())?;
    let cache = data.get::<crate::RatesStore>()
        .cloned()
        .ok_or("Rates cache not initialized".to_string())?;
    Ok((client, cache))
}

/// Current rates, refreshed first if the cache is stale
pub async fn get_rates(ctx: &Context) -> Result<ExchangeRates, String> {
    let (client, cache) = get_rates_handles(ctx).await?;
    rates_service::get_rates(&client, &cache).await
}

/// Cached rates without touching the network; `None` if never loaded
pub async fn get_cached_rates(ctx: &Context) -> Option<ExchangeRates> {
    let (_, cache) = get_rates_handles(ctx).await.ok()?;
    let cache = cache.read().await;
    cache.snapshot().cloned()
}

/// Fetch rates now, whatever the cache age
pub async fn refresh_rates(ctx: &Context) -> Result<ExchangeRates, String> {
    let (client, cache) = get_rates_handles(ctx).await?;
    rates_service::refresh_rates(&client, &cache).await
}
