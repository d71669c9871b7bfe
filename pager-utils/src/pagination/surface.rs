//! The message a paged embed renders into, and its Discord implementation.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};

use crate::events::{EventHub, ReactionEvent};
use crate::permissions::can_manage_reactions;

/// Platform primitives a paged embed session needs.
///
/// Nothing here retries; failures are returned to the session as-is.
#[async_trait]
pub trait PagedSurface: Send + Sync {
    /// Send a new embed message and return its id.
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: Embed,
    ) -> anyhow::Result<Id<MessageMarker>>;

    /// Replace the embed of an existing message. Fails if it was deleted.
    async fn edit_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        embed: Embed,
    ) -> anyhow::Result<()>;

    /// Send a plain text message.
    async fn send_text(&self, channel_id: Id<ChannelMarker>, content: &str) -> anyhow::Result<()>;

    /// React to a message with `glyph`.
    async fn attach_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        glyph: &str,
    ) -> anyhow::Result<()>;

    /// Remove another user's `glyph` reaction. Needs reaction management.
    async fn remove_user_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        glyph: &str,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()>;

    /// Remove the bot's own `glyph` reaction.
    async fn remove_own_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        glyph: &str,
    ) -> anyhow::Result<()>;

    /// Remove every reaction from a message. Needs reaction management.
    async fn clear_reactions(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> anyhow::Result<()>;

    /// Whether the bot may remove other users' reactions in `channel_id`.
    async fn can_manage_reactions(&self, channel_id: Id<ChannelMarker>) -> anyhow::Result<bool>;

    /// A fresh receiver of reactions added anywhere the bot can see.
    fn reaction_events(&self) -> broadcast::Receiver<ReactionEvent>;

    /// Send `prompt` and wait up to `timeout` for the next message from
    /// `author_id` in `channel_id`.
    ///
    /// Returns `Ok(None)` when the wait timed out.
    async fn await_reply(
        &self,
        channel_id: Id<ChannelMarker>,
        prompt: &str,
        author_id: Id<UserMarker>,
        timeout: Duration,
    ) -> anyhow::Result<Option<String>>;
}

/// [`PagedSurface`] backed by the Discord HTTP API and the gateway hub.
#[derive(Debug, Clone)]
pub struct TwilightSurface {
    http: Arc<Client>,
    hub: EventHub,
    bot_user_id: Id<UserMarker>,
}

impl TwilightSurface {
    pub fn new(http: Arc<Client>, hub: EventHub, bot_user_id: Id<UserMarker>) -> Self {
        Self {
            http,
            hub,
            bot_user_id,
        }
    }
}

fn unicode_reaction(glyph: &str) -> RequestReactionType<'_> {
    RequestReactionType::Unicode { name: glyph }
}

#[async_trait]
impl PagedSurface for TwilightSurface {
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: Embed,
    ) -> anyhow::Result<Id<MessageMarker>> {
        let message = self
            .http
            .create_message(channel_id)
            .embeds(&[embed])
            .await?
            .model()
            .await?;

        Ok(message.id)
    }

    async fn edit_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        embed: Embed,
    ) -> anyhow::Result<()> {
        self.http
            .update_message(channel_id, message_id)
            .embeds(Some(&[embed]))
            .await?;

        Ok(())
    }

    async fn send_text(&self, channel_id: Id<ChannelMarker>, content: &str) -> anyhow::Result<()> {
        self.http.create_message(channel_id).content(content).await?;

        Ok(())
    }

    async fn attach_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        glyph: &str,
    ) -> anyhow::Result<()> {
        self.http
            .create_reaction(channel_id, message_id, &unicode_reaction(glyph))
            .await?;

        Ok(())
    }

    async fn remove_user_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        glyph: &str,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()> {
        self.http
            .delete_reaction(channel_id, message_id, &unicode_reaction(glyph), user_id)
            .await?;

        Ok(())
    }

    async fn remove_own_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        glyph: &str,
    ) -> anyhow::Result<()> {
        self.http
            .delete_current_user_reaction(channel_id, message_id, &unicode_reaction(glyph))
            .await?;

        Ok(())
    }

    async fn clear_reactions(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> anyhow::Result<()> {
        self.http
            .delete_all_reactions(channel_id, message_id)
            .await?;

        Ok(())
    }

    async fn can_manage_reactions(&self, channel_id: Id<ChannelMarker>) -> anyhow::Result<bool> {
        can_manage_reactions(&self.http, channel_id, self.bot_user_id).await
    }

    fn reaction_events(&self) -> broadcast::Receiver<ReactionEvent> {
        self.hub.subscribe_reactions()
    }

    async fn await_reply(
        &self,
        channel_id: Id<ChannelMarker>,
        prompt: &str,
        author_id: Id<UserMarker>,
        timeout: Duration,
    ) -> anyhow::Result<Option<String>> {
        // Subscribe before prompting so a fast reply cannot slip past.
        let mut replies = self.hub.subscribe_replies();
        self.send_text(channel_id, prompt).await?;

        let wait_for_reply = async {
            loop {
                match replies.recv().await {
                    Ok(reply) if reply.channel_id == channel_id && reply.author_id == author_id => {
                        return Some(reply.content);
                    }
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => return None,
                }
            }
        };

        Ok(tokio::time::timeout(timeout, wait_for_reply)
            .await
            .ok()
            .flatten())
    }
}
