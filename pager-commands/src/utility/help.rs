use tracing::debug;
use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};

use super::paged_embed_for;
use crate::{COMMANDS, CommandMeta};
use pager_core::Context;
use pager_utils::{
    embed::build_page_embed,
    pagination::{Action, PagedSurface},
    parse::parse_one_based_page,
};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page|category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 8;
const HELP_TITLE: &str = "Available Commands";

/// Render the command catalog as a reaction-paged embed.
///
/// Inputs:
/// - optional start page or category: `!help [page|category]`.
///
/// Error behavior:
/// - unknown categories list the known ones.
/// - a start page past the end reports the available range.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let parsed_page = arg1.and_then(|raw| parse_one_based_page(Some(raw)));
    let category = match (arg1, parsed_page) {
        (Some(raw), None) => Some(raw),
        _ => None,
    };

    let known_categories = categories();
    if let Some(wanted_category) = category
        && !known_categories.contains(&wanted_category)
    {
        let out = unknown_category_message(wanted_category, &known_categories);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let commands = sorted_commands(category);
    let pages = help_pages(&commands)?;
    if pages.is_empty() {
        http.create_message(msg.channel_id)
            .content("No commands found.")
            .await?;
        return Ok(());
    }

    let total = pages.len();
    let requested_page = parsed_page.unwrap_or(1);
    if requested_page > total {
        let out = format!("Page {requested_page} does not exist. Available pages: 1-{total}.");
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    if total == 1 {
        ctx.surface.send_embed(msg.channel_id, pages[0].clone()).await?;
        return Ok(());
    }

    let mut paged = paged_embed_for(&ctx, &msg)?;
    paged
        .set_pages(pages)
        .bind("prev", Action::PrevPage)
        .bind("1234", Action::PromptGoTo)
        .bind("next", Action::NextPage)
        .page_to(requested_page)?;

    let session = paged.run().await?;
    debug!(
        message_id = ?session.message_id(),
        user_id = msg.author.id.get(),
        "help session started"
    );

    Ok(())
}

fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

fn unknown_category_message(wanted: &str, categories: &[&str]) -> String {
    format!(
        "Unknown category `{wanted}`. Available categories: {}.",
        categories
            .iter()
            .map(|category| format!("`{category}`"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

/// Commands grouped under bold category headers.
fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category = None;

    for command in commands {
        if current_category != Some(command.category) {
            if current_category.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", command.category));
            current_category = Some(command.category);
        }
        out.push_str(&format!("`{}` - {}\n", command.usage, command.desc));
    }

    out.trim_end().to_owned()
}

fn help_pages(commands: &[&CommandMeta]) -> anyhow::Result<Vec<Embed>> {
    commands
        .chunks(HELP_COMMANDS_PER_PAGE)
        .map(|chunk| build_page_embed(HELP_TITLE, grouped_help_description(chunk)))
        .collect()
}
