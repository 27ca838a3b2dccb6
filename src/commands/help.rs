use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 Rate Board Commands Help")
        .description("Keep a list of currencies you care about and convert between them.")
        .color(0x00b0f4)
        .field(
            "📋 Active List",
            "`$active` - Show your active currencies\n\
             `$add <CODE>` - Add a currency\n\
             `$remove <CODE>` - Remove a currency\n\
             `$undo` - Restore the last removed currency\n\
             `$move <from> <to>` - Reorder your list",
            false,
        )
        .field(
            "🔎 Finding Currencies",
            "`$candidates [search] [page]` - Currencies you can still add",
            false,
        )
        .field(
            "💱 Converting",
            "`$focus <CODE>` - Choose the currency you type amounts in\n\
             `$convert <amount> [CODE]` - Convert into every active currency\n\
             `$rates` - Show when rates were last updated",
            false,
        )
        .field(
            "⚡ Rate Limiting",
            "2-second cooldown per command per user",
            false,
        );

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
