use thiserror::Error;

/// Errors raised by the pagination controller itself.
///
/// Platform I/O failures are not represented here; they travel as
/// `anyhow::Error` like every other HTTP call in the bot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The paged embed was built without an invoking user.
    #[error("a paged embed needs the user who invoked the command")]
    MissingCaller,
    /// A reaction reached the router without an action bound to it.
    #[error("no action is bound to reaction {glyph}")]
    UnboundToken { glyph: String },
    /// A named action did not match any built-in navigation action.
    #[error("unknown pagination action `{name}`")]
    UnknownAction { name: String },
    /// A one-based page jump fell outside `1..=total`.
    #[error("page {page} is out of range (1-{total})")]
    OutOfRange { page: usize, total: usize },
    /// A page-jump reply was not a page number.
    #[error("`{input}` is not a page number")]
    InvalidInput { input: String },
}
