use tracing::debug;
use twilight_model::gateway::payload::incoming::MessageCreate;

use super::paged_embed_for;
use crate::CommandMeta;
use pager_core::Context;
use pager_utils::{
    embed::build_page_embed,
    pagination::{Action, BLANK_FIELD_TITLE, CustomOutcome, split_fields},
};

pub const META: CommandMeta = CommandMeta {
    name: "pagetest",
    desc: "Test reaction pagination over long text.",
    category: "utility",
    usage: "!pagetest [fields_per_page]",
};

const MAX_FIELDS_PER_PAGE: usize = 3;
const SAMPLE_LINES: usize = 40;

/// Pagination test command.
///
/// Purpose:
/// - verify text splitting, reaction navigation and the page-jump prompt.
///
/// Inputs:
/// - optional fields per page (1-3): `!pagetest [fields_per_page]`.
///
/// Error behavior:
/// - returns usage text on invalid input.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(per_page) = parse_fields_per_page(arg1) else {
        let usage = format!(
            "Usage: `{}` (between 1 and {MAX_FIELDS_PER_PAGE})",
            META.usage
        );
        ctx.http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let template = build_page_embed("Pagination Test", "Sample text split into embed fields.")?;
    let pages = split_fields(&sample_text(), &template, per_page, BLANK_FIELD_TITLE);

    let mut paged = paged_embed_for(&ctx, &msg)?;
    paged
        .set_pages(pages)
        .bind("rewind", Action::custom(|store| {
            store.page_to(1)?;
            Ok(CustomOutcome::Rerender)
        }))
        .bind("prev", Action::PrevPage)
        .bind("1234", Action::PromptGoTo)
        .bind("next", Action::NextPage);

    let session = paged.run().await?;
    debug!(
        message_id = ?session.message_id(),
        user_id = msg.author.id.get(),
        per_page,
        "pagetest session started"
    );

    Ok(())
}

fn parse_fields_per_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|count| (1..=MAX_FIELDS_PER_PAGE).contains(count)),
        None => Some(1),
    }
}

fn sample_text() -> String {
    (1..=SAMPLE_LINES)
        .map(|index| {
            format!(
                "Sample line #{index}: long enough that a few dozen of them overflow one field.\n"
            )
        })
        .collect()
}
