//! Gateway fan-out for reaction collectors and reply prompts.
//!
//! Twilight delivers every event to the single shard loop. Paged embeds run
//! in their own tasks, so the loop republishes the events they care about
//! on broadcast channels and each session filters its own slice.

use tokio::sync::broadcast;
use twilight_model::{
    channel::message::EmojiReactionType,
    gateway::payload::incoming::{MessageCreate, ReactionAdd},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};

use crate::pagination::glyph::normalize_glyph;

const EVENT_CAPACITY: usize = 256;

/// A reaction added to some message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub user_id: Id<UserMarker>,
    /// Normalized unicode glyph, or `name:id` for custom emoji.
    pub glyph: String,
}

/// A message posted in some channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyEvent {
    pub channel_id: Id<ChannelMarker>,
    pub author_id: Id<UserMarker>,
    pub content: String,
}

impl ReactionEvent {
    /// Convert a gateway reaction into the collector's event shape.
    pub fn from_gateway(reaction: &ReactionAdd) -> Self {
        let glyph = match &reaction.emoji {
            EmojiReactionType::Unicode { name } => normalize_glyph(name).to_owned(),
            EmojiReactionType::Custom { id, name, .. } => {
                format!("{}:{}", name.as_deref().unwrap_or_default(), id)
            }
        };

        Self {
            channel_id: reaction.channel_id,
            message_id: reaction.message_id,
            user_id: reaction.user_id,
            glyph,
        }
    }
}

impl ReplyEvent {
    /// Convert a gateway message into the prompt's reply shape.
    pub fn from_gateway(msg: &MessageCreate) -> Self {
        Self {
            channel_id: msg.channel_id,
            author_id: msg.author.id,
            content: msg.content.clone(),
        }
    }
}

/// Broadcast hub shared by the shard loop (publisher) and sessions (subscribers).
///
/// Cheap to clone; clones publish to the same channels.
#[derive(Debug, Clone)]
pub struct EventHub {
    reactions: broadcast::Sender<ReactionEvent>,
    replies: broadcast::Sender<ReplyEvent>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    pub fn new() -> Self {
        let (reactions, _) = broadcast::channel(EVENT_CAPACITY);
        let (replies, _) = broadcast::channel(EVENT_CAPACITY);

        Self { reactions, replies }
    }

    /// Publish a gateway reaction. Dropped silently when nobody listens.
    pub fn publish_reaction(&self, reaction: &ReactionAdd) {
        if self.reactions.receiver_count() > 0 {
            let _ = self.reactions.send(ReactionEvent::from_gateway(reaction));
        }
    }

    /// Publish a gateway message. Dropped silently when nobody listens.
    pub fn publish_message(&self, msg: &MessageCreate) {
        if self.replies.receiver_count() > 0 {
            let _ = self.replies.send(ReplyEvent::from_gateway(msg));
        }
    }

    pub fn subscribe_reactions(&self) -> broadcast::Receiver<ReactionEvent> {
        self.reactions.subscribe()
    }

    pub fn subscribe_replies(&self) -> broadcast::Receiver<ReplyEvent> {
        self.replies.subscribe()
    }
}
