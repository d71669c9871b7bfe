//! Stable facade for reaction-driven paged embeds used by command handlers.

use std::time::Duration;

/// Default lifetime of a paged embed session.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Prompt sent when the caller asks to jump to a page.
pub const GOTO_PROMPT_MESSAGE: &str =
    "What page do you want to see? (Say `cancel` to cancel this prompt)";
/// Reply to a page-jump answer that is not a number.
pub const INVALID_RESPONSE_MESSAGE: &str = "That is not a valid response.";
/// Reply to a page-jump answer outside the page range.
pub const PAGE_MISSING_MESSAGE: &str = "That page does not exist.";

mod collector;
pub mod glyph;
mod router;
mod session;
mod split;
mod store;
mod surface;

pub use collector::{Collected, ReactionCollector, SessionEnd};
pub use glyph::{GLYPHS, Token, glyph_for};
pub use router::{Action, ActionRouter, CustomAction, CustomOutcome};
pub use session::{
    CleanupPolicy, PagedEmbed, PagedEmbedOptions, PagedSession, SessionState, SessionSummary,
};
pub use split::{BLANK_FIELD_TITLE, FIELD_VALUE_LIMIT, split_chunks, split_fields};
pub use store::PageStore;
pub use surface::{PagedSurface, TwilightSurface};
