use chrono::Utc;
use serenity::builder::CreateEmbedFooter;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::rates_service::format_age;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let force = args.first().map(|a| a.eq_ignore_ascii_case("refresh")).unwrap_or(false);
    tracing::info!("📈 Rates command called by user {} (refresh: {})", msg.author.id, force);

    let rates = if force {
        super::refresh_rates(ctx).await?
    } else {
        super::get_rates(ctx).await?
    };

    let age = format_age(Utc::now() - rates.timestamp);
    let embed = serenity::builder::CreateEmbed::default()
        .title("📈 Exchange Rates")
        .field("Base", rates.base.to_string(), true)
        .field("Currencies", rates.rates.len().to_string(), true)
        .field("Updated", format!("{} ({} ago)", rates.timestamp.format("%Y-%m-%d %H:%M UTC"), age), false)
        .footer(CreateEmbedFooter::new("Use `$rates refresh` to fetch the latest rates now"))
        .color(0x00b0f4);

    super::reply_embed(ctx, msg, embed).await
}
