use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::utils::errors::SelectionError;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("🎯 Focus Command")
            .description("Choose the active currency that `$convert` amounts are typed in")
            .field("Usage", "`$focus <CODE>`", false)
            .field("Example", "`$focus EUR` then `$convert 25`", false)
            .color(0x00aaff);

        return super::reply_embed(ctx, msg, help_embed).await;
    }

    let code = super::parse_code_arg(args[0], "$focus <CODE>")?;

    let sessions = super::get_sessions(ctx).await?;
    let name = sessions
        .update(msg.author.id.get(), |coordinator| {
            let currency = coordinator.focus(&code)?;
            Ok::<_, SelectionError>(currency.name.clone())
        })
        .await
        .map_err(|e| e.to_string())?;

    let embed = serenity::builder::CreateEmbed::default()
        .title("🎯 Focus Changed")
        .description(format!("Amounts are now entered in **{}** ({}).", code, name))
        .color(0x00ff00);

    super::reply_embed(ctx, msg, embed).await
}
