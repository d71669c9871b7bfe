pub mod utility;

use twilight_model::gateway::payload::incoming::MessageCreate;

use pager_core::Context;

// Global command meta data
#[derive(Debug)]
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    utility::pagetest::META,
    // Add new commands here
];

/// A prefix command split into its name and first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lowercased command name.
    pub name: String,
    pub arg1: Option<&'a str>,
}

/// Split `content` into a command and its first argument. Later words are
/// ignored.
///
/// Returns `None` when the message does not start with `prefix`.
pub fn parse_command(content: &str, prefix: char) -> Option<ParsedCommand<'_>> {
    let content = content.trim().strip_prefix(prefix)?.trim();

    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let arg1 = command_and_rest
        .next()
        .and_then(|rest| rest.split_whitespace().next());

    Some(ParsedCommand { name, arg1 })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let Some(command) = parse_command(&msg.content, ctx.config.command_prefix) else {
        return Ok(());
    };

    // Own the pieces so `msg` can move into the handler.
    let name = command.name;
    let arg1 = command.arg1.map(ToOwned::to_owned);
    let arg1 = arg1.as_deref();

    match name.as_str() {
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "pagetest" => utility::pagetest::run(ctx.clone(), msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}
