use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::board_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    tracing::info!("📋 Active command called by user {}", msg.author.id);

    let sessions = super::get_sessions(ctx).await?;
    // Only cached rates: listing should never wait on the API
    let rates = super::get_cached_rates(ctx).await;

    let embed = sessions
        .view(msg.author.id.get(), |coordinator| {
            board_service::create_active_embed(coordinator, rates.as_ref())
        })
        .await;

    super::reply_embed(ctx, msg, embed).await
}
