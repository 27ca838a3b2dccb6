use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::conversion_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("💱 Convert Command")
            .description("Convert an amount of your focused currency into every active currency")
            .field("Usage", "`$convert <amount> [CODE]` or `$c <amount> [CODE]`", false)
            .field("Examples",
                "`$convert 100` (in your focused currency)\n\
                 `$c 12.50 EUR` (focus EUR, then convert)\n\
                 `$c 99,95 JPY` (comma works as decimal separator)",
                false)
            .field("Rules",
                "• Digits with at most one decimal separator\n\
                 • Up to 20 digits before and 4 after the separator",
                false)
            .color(0x00aaff);

        return super::reply_embed(ctx, msg, help_embed).await;
    }

    let amount = conversion_service::parse_amount(args[0]).map_err(|e| e.to_string())?;
    let code = args
        .get(1)
        .map(|arg| super::parse_code_arg(arg, "$convert <amount> [CODE]"))
        .transpose()?;
    let user_id = msg.author.id.get();
    let sessions = super::get_sessions(ctx).await?;

    tracing::info!("💱 User {} converting {}", user_id, amount);
    // Rates first: a failed fetch must not leave a focus change behind
    let rates = super::get_rates(ctx).await?;

    let result = match code {
        Some(code) => {
            sessions
                .update(user_id, |coordinator| {
                    conversion_service::focus_and_convert(coordinator, &code, amount, &rates)
                })
                .await?
        }
        None => {
            sessions
                .view(user_id, |coordinator| {
                    conversion_service::convert_active(coordinator, amount, &rates)
                })
                .await?
        }
    };

    super::reply_embed(ctx, msg, conversion_service::create_conversion_embed(&result)).await
}
