use std::sync::Arc;

use twilight_model::gateway::payload::incoming::MessageCreate;

use pager_core::Context;
use pager_utils::{
    error::PaginationError,
    pagination::{PagedEmbed, PagedEmbedOptions, PagedSurface},
};

pub mod help;
pub mod pagetest;

/// A paged embed in the message's channel, driven by its author.
fn paged_embed_for(ctx: &Context, msg: &MessageCreate) -> Result<PagedEmbed, PaginationError> {
    let surface: Arc<dyn PagedSurface> = ctx.surface.clone();
    let options = PagedEmbedOptions::new(msg.channel_id, Some(msg.author.id))
        .session_timeout(ctx.config.session_timeout);

    PagedEmbed::new(surface, options)
}
