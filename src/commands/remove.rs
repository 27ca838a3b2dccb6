use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::board_service;
use crate::utils::errors::SelectionError;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("➖ Remove Command")
            .description("Remove a currency from your active list")
            .field("Usage", "`$remove <CODE>` (aliases: `$rm`, `$deactivate`)", false)
            .field("Undo", "`$undo` puts the last removed currency back where it was", false)
            .color(0x00aaff);

        return super::reply_embed(ctx, msg, help_embed).await;
    }

    let code = super::parse_code_arg(args[0], "$remove <CODE>")?;
    tracing::info!("➖ User {} removing {}", msg.author.id, code);

    let sessions = super::get_sessions(ctx).await?;
    let embed = sessions
        .update(msg.author.id.get(), |coordinator| {
            let removed = coordinator.deactivate(&code)?;
            Ok::<_, SelectionError>(board_service::create_removed_embed(coordinator, &removed))
        })
        .await
        .map_err(|e| e.to_string())?;

    super::reply_embed(ctx, msg, embed).await
}

pub async fn execute_undo(ctx: &Context, msg: &Message) -> Result<(), String> {
    tracing::info!("↩️ User {} undoing last removal", msg.author.id);

    let sessions = super::get_sessions(ctx).await?;
    let embed = sessions
        .update(msg.author.id.get(), |coordinator| {
            let restored = coordinator.undo_deactivate()?;
            Ok::<_, SelectionError>(board_service::create_restored_embed(coordinator, &restored))
        })
        .await
        .map_err(|e| e.to_string())?;

    super::reply_embed(ctx, msg, embed).await
}
