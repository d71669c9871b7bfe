//! Time-bounded reaction collection for one paged message.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use twilight_model::id::{
    Id,
    marker::{MessageMarker, UserMarker},
};

use super::glyph::Token;
use crate::events::ReactionEvent;

/// Why a session stopped listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The session deadline passed.
    TimedOut,
    /// [`super::PagedSession::stop`] was called.
    Stopped,
    /// The gateway hub went away.
    SourceClosed,
    /// There was no page to show, so nothing was ever collected.
    NothingToShow,
}

/// Outcome of waiting for the next reaction.
#[derive(Debug)]
pub enum Collected {
    Reaction(ReactionEvent),
    Ended(SessionEnd),
}

/// Filters the hub's reactions down to one message, one user and a fixed
/// set of tokens, until the deadline passes or the session is stopped.
#[derive(Debug)]
pub struct ReactionCollector {
    events: broadcast::Receiver<ReactionEvent>,
    message_id: Id<MessageMarker>,
    actor_id: Id<UserMarker>,
    tokens: Vec<Token>,
    deadline: Instant,
    stop: CancellationToken,
}

impl ReactionCollector {
    pub fn new(
        events: broadcast::Receiver<ReactionEvent>,
        message_id: Id<MessageMarker>,
        actor_id: Id<UserMarker>,
        tokens: Vec<Token>,
        deadline: Instant,
        stop: CancellationToken,
    ) -> Self {
        Self {
            events,
            message_id,
            actor_id,
            tokens,
            deadline,
            stop,
        }
    }

    /// Whether a reaction belongs to this collector.
    pub fn accepts(&self, event: &ReactionEvent) -> bool {
        event.message_id == self.message_id
            && event.user_id == self.actor_id
            && self.tokens.iter().any(|token| token.matches(&event.glyph))
    }

    /// Wait for the next accepted reaction.
    ///
    /// Stop and deadline are checked before every event, so a queue of
    /// pending reactions cannot keep a session alive past its deadline.
    pub async fn next(&mut self) -> Collected {
        loop {
            tokio::select! {
                biased;
                () = self.stop.cancelled() => return Collected::Ended(SessionEnd::Stopped),
                () = tokio::time::sleep_until(self.deadline) => {
                    return Collected::Ended(SessionEnd::TimedOut);
                }
                received = self.events.recv() => match received {
                    Ok(event) if self.accepts(&event) => return Collected::Reaction(event),
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            skipped,
                            message_id = self.message_id.get(),
                            "reaction collector lagged behind the gateway"
                        );
                    }
                    Err(RecvError::Closed) => return Collected::Ended(SessionEnd::SourceClosed),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use twilight_model::id::marker::ChannelMarker;

    use super::*;

    const MESSAGE: Id<MessageMarker> = Id::new(10);
    const ACTOR: Id<UserMarker> = Id::new(20);
    const CHANNEL: Id<ChannelMarker> = Id::new(30);

    fn reaction(message: u64, user: u64, glyph: &str) -> ReactionEvent {
        ReactionEvent {
            channel_id: CHANNEL,
            message_id: Id::new(message),
            user_id: Id::new(user),
            glyph: glyph.to_owned(),
        }
    }

    fn collector(
        events: broadcast::Receiver<ReactionEvent>,
        stop: CancellationToken,
    ) -> ReactionCollector {
        ReactionCollector::new(
            events,
            MESSAGE,
            ACTOR,
            vec![Token::new("prev"), Token::new("next")],
            Instant::now() + Duration::from_secs(60),
            stop,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_actors_registered_reactions_on_this_message_pass() {
        let (tx, rx) = broadcast::channel(16);
        let mut collector = collector(rx, CancellationToken::new());

        tx.send(reaction(10, 99, "⏭")).unwrap();
        tx.send(reaction(11, 20, "⏭")).unwrap();
        tx.send(reaction(10, 20, "🦉")).unwrap();
        tx.send(reaction(10, 20, "⏮")).unwrap();

        match collector.next().await {
            Collected::Reaction(event) => assert_eq!(event.glyph, "⏮"),
            Collected::Ended(end) => panic!("collector ended early: {end:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_ends_collection() {
        let (_tx, rx) = broadcast::channel(16);
        let mut collector = collector(rx, CancellationToken::new());

        assert!(matches!(
            collector.next().await,
            Collected::Ended(SessionEnd::TimedOut)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_wins_over_pending_reactions() {
        let (tx, rx) = broadcast::channel(16);
        let stop = CancellationToken::new();
        let mut collector = collector(rx, stop.clone());

        tx.send(reaction(10, 20, "⏭")).unwrap();
        stop.cancel();

        assert!(matches!(
            collector.next().await,
            Collected::Ended(SessionEnd::Stopped)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_hub_ends_collection() {
        let (tx, rx) = broadcast::channel::<ReactionEvent>(16);
        let mut collector = collector(rx, CancellationToken::new());
        drop(tx);

        assert!(matches!(
            collector.next().await,
            Collected::Ended(SessionEnd::SourceClosed)
        ));
    }
}
