use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::board_service;
use crate::utils::errors::SelectionError;

const USAGE: &str = "$move <from> <to>";

/// Parse the 1-based positions shown by `$active` into 0-based indices
fn parse_positions(args: &[&str]) -> Result<(usize, usize), String> {
    let parse = |arg: &str| -> Result<usize, String> {
        match arg.parse::<usize>() {
            Ok(position) if position >= 1 => Ok(position - 1),
            _ => Err(format!("'{}' is not a valid position\nUsage: `{}`", arg, USAGE)),
        }
    };

    match args {
        [from, to, ..] => Ok((parse(*from)?, parse(*to)?)),
        _ => Err(format!("You need to provide two positions\nUsage: `{}`", USAGE)),
    }
}

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("↕️ Move Command")
            .description("Reorder your active list")
            .field("Usage", format!("`{}`", USAGE), false)
            .field("Example", "`$move 3 1` (third currency becomes the first)", false)
            .field("Notes", "Positions are the numbers shown by `$active`", false)
            .color(0x00aaff);

        return super::reply_embed(ctx, msg, help_embed).await;
    }

    let (from, to) = parse_positions(args)?;
    tracing::info!("↕️ User {} moving position {} to {}", msg.author.id, from + 1, to + 1);

    let sessions = super::get_sessions(ctx).await?;
    let embed = sessions
        .update(msg.author.id.get(), |coordinator| {
            coordinator.move_currency(from, to)?;
            Ok::<_, SelectionError>(
                serenity::builder::CreateEmbed::default()
                    .title("↕️ Currency Moved")
                    .description(board_service::list_codes(coordinator))
                    .color(0x00ff00),
            )
        })
        .await
        .map_err(|e| match e {
            // Report the positions the user typed
            SelectionError::InvalidPosition { position, len } => format!(
                "Position {} is out of range (your list has {} currencies)",
                position + 1,
                len
            ),
            other => other.to_string(),
        })?;

    super::reply_embed(ctx, msg, embed).await
}
