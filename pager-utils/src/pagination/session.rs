//! Paged embed sessions: initial render, reaction dispatch and cleanup.

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};

use super::collector::{Collected, ReactionCollector, SessionEnd};
use super::glyph::Token;
use super::router::{Action, ActionRouter, CustomOutcome};
use super::store::PageStore;
use super::surface::PagedSurface;
use super::{
    DEFAULT_SESSION_TIMEOUT, GOTO_PROMPT_MESSAGE, INVALID_RESPONSE_MESSAGE, PAGE_MISSING_MESSAGE,
};
use crate::error::PaginationError;
use crate::parse::{PageReply, parse_page_reply};

/// Latest deadline a session accepts. Longer timeouts are clamped to it.
const MAX_SESSION_SPAN: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Where and for whom a paged embed is shown.
#[derive(Debug, Clone)]
pub struct PagedEmbedOptions {
    pub channel_id: Id<ChannelMarker>,
    /// Existing message to take over instead of sending a new one.
    pub message_id: Option<Id<MessageMarker>>,
    /// The user allowed to drive the session.
    pub caller_id: Option<Id<UserMarker>>,
    pub session_timeout: Duration,
}

impl PagedEmbedOptions {
    pub fn new(channel_id: Id<ChannelMarker>, caller_id: Option<Id<UserMarker>>) -> Self {
        Self {
            channel_id,
            message_id: None,
            caller_id,
            session_timeout: DEFAULT_SESSION_TIMEOUT,
        }
    }

    #[must_use]
    pub fn message(mut self, message_id: Id<MessageMarker>) -> Self {
        self.message_id = Some(message_id);
        self
    }

    #[must_use]
    pub fn session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }
}

/// Lifecycle of a paged embed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unstarted,
    Rendering,
    Listening,
    Acting,
    Closing,
    Closed,
}

/// How reactions are taken off the message when a session closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupPolicy {
    /// One call removing every reaction. Needs reaction management.
    BulkClear,
    /// Remove each of the bot's own reactions.
    RemoveOwn,
}

impl CleanupPolicy {
    fn for_capability(can_manage_reactions: bool) -> Self {
        if can_manage_reactions {
            Self::BulkClear
        } else {
            Self::RemoveOwn
        }
    }
}

/// Final report of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    /// Zero-based cursor when the session closed.
    pub final_cursor: usize,
    pub events_handled: usize,
}

/// A paged embed being configured. Call [`PagedEmbed::run`] to show it.
pub struct PagedEmbed {
    surface: Arc<dyn PagedSurface>,
    store: PageStore,
    router: ActionRouter,
    channel_id: Id<ChannelMarker>,
    message_id: Option<Id<MessageMarker>>,
    caller_id: Id<UserMarker>,
    session_timeout: Duration,
}

impl std::fmt::Debug for PagedEmbed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedEmbed")
            .field("store", &self.store)
            .field("router", &self.router)
            .field("channel_id", &self.channel_id)
            .field("message_id", &self.message_id)
            .field("caller_id", &self.caller_id)
            .field("session_timeout", &self.session_timeout)
            .finish_non_exhaustive()
    }
}

impl PagedEmbed {
    /// Create a paged embed for the user who invoked a command.
    ///
    /// # Errors
    ///
    /// [`PaginationError::MissingCaller`] when `options.caller_id` is `None`.
    pub fn new(
        surface: Arc<dyn PagedSurface>,
        options: PagedEmbedOptions,
    ) -> Result<Self, PaginationError> {
        let caller_id = options.caller_id.ok_or(PaginationError::MissingCaller)?;

        Ok(Self {
            surface,
            store: PageStore::new(),
            router: ActionRouter::new(),
            channel_id: options.channel_id,
            message_id: options.message_id,
            caller_id,
            session_timeout: options.session_timeout,
        })
    }

    pub fn add_page(&mut self, page: Embed) -> &mut Self {
        self.store.add_page(page);
        self
    }

    pub fn add_pages(&mut self, pages: impl IntoIterator<Item = Embed>) -> &mut Self {
        self.store.add_pages(pages);
        self
    }

    pub fn set_pages(&mut self, pages: Vec<Embed>) -> &mut Self {
        self.store.set_pages(pages);
        self
    }

    pub fn clear_pages(&mut self) -> &mut Self {
        self.store.clear_pages();
        self
    }

    /// Start on a one-based page instead of the first one.
    ///
    /// # Errors
    ///
    /// [`PaginationError::OutOfRange`] when the page does not exist.
    pub fn page_to(&mut self, page: usize) -> Result<&mut Self, PaginationError> {
        self.store.page_to(page)?;
        Ok(self)
    }

    /// Bind a reaction to an action. See [`ActionRouter::bind`].
    pub fn bind(&mut self, token: impl Into<Token>, action: Action) -> &mut Self {
        self.router.bind(token, action);
        self
    }

    pub fn unbind_all(&mut self) -> &mut Self {
        self.router.unbind_all();
        self
    }

    pub fn pages(&self) -> &PageStore {
        &self.store
    }

    pub fn router(&self) -> &ActionRouter {
        &self.router
    }

    /// Show the current page, attach the bound reactions and start listening.
    ///
    /// Returns once the reactions are attached; the session then runs on its
    /// own task until it times out or is stopped.
    ///
    /// # Errors
    ///
    /// Propagates failures sending the first page or attaching reactions.
    pub async fn run(self) -> anyhow::Result<PagedSession> {
        let Self {
            surface,
            store,
            router,
            channel_id,
            message_id,
            caller_id,
            session_timeout,
        } = self;

        debug!(
            state = ?SessionState::Rendering,
            channel_id = channel_id.get(),
            "paged embed starting"
        );

        let message_id = match message_id {
            Some(message_id) => message_id,
            None => {
                let Some(first_page) = store.render_current() else {
                    debug!(channel_id = channel_id.get(), "paged embed has no page to show");
                    return Ok(PagedSession::finished(store.cursor()));
                };
                surface.send_embed(channel_id, first_page).await?
            }
        };

        for token in router.tokens() {
            surface
                .attach_reaction(channel_id, message_id, token.glyph())
                .await?;
        }

        let can_manage_reactions = surface
            .can_manage_reactions(channel_id)
            .await
            .unwrap_or_else(|source| {
                warn!(
                    ?source,
                    channel_id = channel_id.get(),
                    "could not resolve reaction permissions, assuming none"
                );
                false
            });

        let deadline = session_deadline(Instant::now(), session_timeout);
        let stop = CancellationToken::new();
        let collector = ReactionCollector::new(
            surface.reaction_events(),
            message_id,
            caller_id,
            router.tokens().to_vec(),
            deadline,
            stop.clone(),
        );

        let session = ActiveSession {
            surface,
            store,
            router,
            channel_id,
            message_id,
            caller_id,
            cleanup: CleanupPolicy::for_capability(can_manage_reactions),
            manage_reactions: can_manage_reactions,
            deadline,
            stop: stop.clone(),
            state: SessionState::Listening,
            events_handled: 0,
        };

        debug!(
            state = ?SessionState::Listening,
            message_id = message_id.get(),
            cleanup = ?session.cleanup,
            "paged embed listening"
        );

        let task = tokio::spawn(session.listen(collector));

        Ok(PagedSession {
            message_id: Some(message_id),
            stop,
            task: Some(task),
            final_cursor: 0,
        })
    }
}

fn session_deadline(now: Instant, session_timeout: Duration) -> Instant {
    now.checked_add(session_timeout.min(MAX_SESSION_SPAN)).unwrap_or(now)
}

/// Handle to a running (or already finished) paged embed session.
#[derive(Debug)]
pub struct PagedSession {
    message_id: Option<Id<MessageMarker>>,
    stop: CancellationToken,
    task: Option<JoinHandle<anyhow::Result<SessionSummary>>>,
    final_cursor: usize,
}

impl PagedSession {
    fn finished(final_cursor: usize) -> Self {
        Self {
            message_id: None,
            stop: CancellationToken::new(),
            task: None,
            final_cursor,
        }
    }

    /// The paged message, unless there was nothing to show.
    pub fn message_id(&self) -> Option<Id<MessageMarker>> {
        self.message_id
    }

    /// Ask the session to close. Calling it again, or after the session
    /// ended, does nothing.
    pub fn stop(&self) {
        self.stop.cancel();
    }

    /// Wait for the session to close.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the session (an unbound token or a
    /// failing custom action), or a join error if the task panicked.
    pub async fn closed(self) -> anyhow::Result<SessionSummary> {
        match self.task {
            Some(task) => task.await?,
            None => Ok(SessionSummary {
                end: SessionEnd::NothingToShow,
                final_cursor: self.final_cursor,
                events_handled: 0,
            }),
        }
    }
}

/// State owned by the listening task.
struct ActiveSession {
    surface: Arc<dyn PagedSurface>,
    store: PageStore,
    router: ActionRouter,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    caller_id: Id<UserMarker>,
    cleanup: CleanupPolicy,
    manage_reactions: bool,
    deadline: Instant,
    stop: CancellationToken,
    state: SessionState,
    events_handled: usize,
}

impl ActiveSession {
    async fn listen(mut self, mut collector: ReactionCollector) -> anyhow::Result<SessionSummary> {
        let outcome = loop {
            match collector.next().await {
                Collected::Reaction(event) => {
                    self.state = SessionState::Acting;
                    let handled = self.handle(&event.glyph).await;
                    self.events_handled += 1;
                    self.state = SessionState::Listening;

                    if let Err(source) = handled {
                        break Err(source);
                    }
                }
                Collected::Ended(end) => break Ok(end),
            }
        };

        self.close().await;

        match outcome {
            Ok(end) => {
                info!(
                    ?end,
                    message_id = self.message_id.get(),
                    events = self.events_handled,
                    "paged embed closed"
                );
                Ok(SessionSummary {
                    end,
                    final_cursor: self.store.cursor(),
                    events_handled: self.events_handled,
                })
            }
            Err(source) => {
                error!(
                    ?source,
                    message_id = self.message_id.get(),
                    "paged embed ended with an error"
                );
                Err(source)
            }
        }
    }

    async fn handle(&mut self, glyph: &str) -> anyhow::Result<()> {
        if self.manage_reactions
            && let Err(source) = self
                .surface
                .remove_user_reaction(self.channel_id, self.message_id, glyph, self.caller_id)
                .await
        {
            warn!(?source, glyph, "failed to remove the caller's reaction");
        }

        let Some(token) = self.router.token_for(glyph) else {
            return Err(PaginationError::UnboundToken {
                glyph: glyph.to_owned(),
            }
            .into());
        };
        let action = self.router.resolve(token)?;
        debug!(glyph, ?action, "paged embed action");

        match action {
            Action::NextPage => {
                self.store.next_page();
                self.rerender().await;
            }
            Action::PrevPage => {
                self.store.prev_page();
                self.rerender().await;
            }
            Action::PromptGoTo => self.prompt_go_to().await,
            Action::Custom(callback) => {
                if callback(&mut self.store)? == CustomOutcome::Rerender {
                    self.rerender().await;
                }
            }
        }

        Ok(())
    }

    /// Edit the message to show the current page. No page, no edit.
    async fn rerender(&self) {
        let Some(page) = self.store.render_current() else {
            return;
        };

        if let Err(source) = self
            .surface
            .edit_embed(self.channel_id, self.message_id, page)
            .await
        {
            warn!(
                ?source,
                message_id = self.message_id.get(),
                "failed to re-render paged embed"
            );
        }
    }

    async fn prompt_go_to(&mut self) {
        let remaining = self.deadline.saturating_duration_since(Instant::now());

        let reply = tokio::select! {
            biased;
            () = self.stop.cancelled() => Ok(None),
            reply = self.surface.await_reply(
                self.channel_id,
                GOTO_PROMPT_MESSAGE,
                self.caller_id,
                remaining,
            ) => reply,
        };

        let reply = match reply {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                debug!(message_id = self.message_id.get(), "page prompt expired");
                return;
            }
            Err(source) => {
                warn!(?source, "page prompt failed");
                return;
            }
        };

        let notice = match parse_page_reply(&reply) {
            Ok(PageReply::Cancel) => None,
            Ok(PageReply::Page(page)) => match self.store.page_to(page) {
                Ok(()) => {
                    self.rerender().await;
                    None
                }
                Err(source) => {
                    debug!(%source, "page prompt out of range");
                    Some(PAGE_MISSING_MESSAGE)
                }
            },
            Err(source) => {
                debug!(%source, "page prompt reply rejected");
                Some(INVALID_RESPONSE_MESSAGE)
            }
        };

        if let Some(notice) = notice
            && let Err(source) = self.surface.send_text(self.channel_id, notice).await
        {
            warn!(?source, "failed to send page prompt notice");
        }
    }

    /// Take the controls off the message. Runs at most once.
    async fn close(&mut self) {
        if matches!(self.state, SessionState::Closing | SessionState::Closed) {
            return;
        }
        self.state = SessionState::Closing;

        match self.cleanup {
            CleanupPolicy::BulkClear => {
                if let Err(source) = self
                    .surface
                    .clear_reactions(self.channel_id, self.message_id)
                    .await
                {
                    warn!(?source, message_id = self.message_id.get(), "failed to clear reactions");
                }
            }
            CleanupPolicy::RemoveOwn => {
                for token in self.router.tokens() {
                    if let Err(source) = self
                        .surface
                        .remove_own_reaction(self.channel_id, self.message_id, token.glyph())
                        .await
                    {
                        warn!(?source, glyph = token.glyph(), "failed to remove reaction");
                    }
                }
            }
        }

        self.state = SessionState::Closed;
        debug!(state = ?self.state, message_id = self.message_id.get(), "paged embed cleaned up");
    }
}
