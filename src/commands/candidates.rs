use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::board_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.first().map(|a| a.eq_ignore_ascii_case("help")).unwrap_or(false) {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("🔎 Candidates Command")
            .description("List the currencies that are not in your active list yet")
            .field("Usage", "`$candidates [search] [page]` or `$search [search] [page]`", false)
            .field("Examples",
                "`$candidates` (everything, page 1)\n\
                 `$candidates 2` (page 2)\n\
                 `$search peso` (name or code contains \"peso\")\n\
                 `$search new zealand 1`",
                false)
            .color(0x00aaff);

        return super::reply_embed(ctx, msg, help_embed).await;
    }

    let (query, page_num) = board_service::parse_candidate_args(args);
    tracing::info!("🔎 Candidates for user {}: query {:?}, page {}", msg.author.id, query, page_num);

    let sessions = super::get_sessions(ctx).await?;
    let page = sessions
        .view(msg.author.id.get(), |coordinator| {
            board_service::build_candidate_page(coordinator, query.as_deref(), page_num)
        })
        .await?;

    super::reply_embed(ctx, msg, board_service::create_candidates_embed(&page)).await
}
