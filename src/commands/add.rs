use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::board_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("➕ Add Command")
            .description("Add a currency to the end of your active list")
            .field("Usage", "`$add <CODE>` or `$activate <CODE>`", false)
            .field("Examples", "`$add EUR`\n`$add jpy` (codes are case-insensitive)", false)
            .field("Tip", "Use `$candidates [search]` to see which currencies you can add", false)
            .color(0x00aaff);

        return super::reply_embed(ctx, msg, help_embed).await;
    }

    let code = super::parse_code_arg(args[0], "$add <CODE>")?;
    tracing::info!("➕ User {} adding {}", msg.author.id, code);

    let sessions = super::get_sessions(ctx).await?;
    let embed = sessions
        .update(msg.author.id.get(), |coordinator| {
            coordinator.activate(&code)?;
            Ok::<_, crate::utils::errors::SelectionError>(board_service::create_added_embed(
                coordinator,
                code.as_str(),
            ))
        })
        .await
        .map_err(|e| e.to_string())?;

    super::reply_embed(ctx, msg, embed).await
}
