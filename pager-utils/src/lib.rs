/// Embed builders shared across commands.
pub mod embed;
/// Typed errors raised by the pagination controller.
pub mod error;
/// Gateway fan-out feeding reaction collectors and reply prompts.
pub mod events;
/// Default message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Reaction-driven paged embeds.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
