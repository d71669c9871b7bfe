//! Reaction token → action bindings.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use super::glyph::Token;
use super::store::PageStore;
use crate::error::PaginationError;

/// What a custom action wants done after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomOutcome {
    /// Re-render the current page.
    Rerender,
    /// Leave the message as it is.
    Unchanged,
}

/// Caller-supplied action. Errors end the session.
pub type CustomAction =
    Arc<dyn Fn(&mut PageStore) -> anyhow::Result<CustomOutcome> + Send + Sync>;

/// What happens when a bound reaction is pressed.
#[derive(Clone)]
pub enum Action {
    NextPage,
    PrevPage,
    /// Ask the user for a page number in chat and jump to it.
    PromptGoTo,
    Custom(CustomAction),
}

impl Action {
    /// Wrap a closure as a custom action.
    pub fn custom<F>(callback: F) -> Self
    where
        F: Fn(&mut PageStore) -> anyhow::Result<CustomOutcome> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(callback))
    }
}

impl FromStr for Action {
    type Err = PaginationError;

    /// Resolve a built-in action name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "next" | "nextpage" => Ok(Self::NextPage),
            "prev" | "prevpage" => Ok(Self::PrevPage),
            "prompt" | "goto" | "gotopage" | "ask" => Ok(Self::PromptGoTo),
            _ => Err(PaginationError::UnknownAction {
                name: name.to_owned(),
            }),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextPage => f.write_str("NextPage"),
            Self::PrevPage => f.write_str("PrevPage"),
            Self::PromptGoTo => f.write_str("PromptGoTo"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Registered reaction tokens in attachment order, and their actions.
#[derive(Debug, Clone, Default)]
pub struct ActionRouter {
    order: Vec<Token>,
    bindings: HashMap<Token, Action>,
}

impl ActionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `token`.
    ///
    /// Re-binding a token replaces its action and moves it to the end of the
    /// attachment order.
    pub fn bind(&mut self, token: impl Into<Token>, action: Action) -> &mut Self {
        let token = token.into();

        self.order.retain(|registered| *registered != token);
        self.order.push(token.clone());
        self.bindings.insert(token, action);
        self
    }

    pub fn unbind_all(&mut self) -> &mut Self {
        self.order.clear();
        self.bindings.clear();
        self
    }

    /// Tokens in the order they are attached to the message.
    pub fn tokens(&self) -> &[Token] {
        &self.order
    }

    /// The registered token a reported glyph belongs to, if any.
    pub fn token_for(&self, glyph: &str) -> Option<&Token> {
        self.order.iter().find(|token| token.matches(glyph))
    }

    /// Look up the action bound to `token`.
    ///
    /// # Errors
    ///
    /// [`PaginationError::UnboundToken`] when nothing is bound to it.
    pub fn resolve(&self, token: &Token) -> Result<Action, PaginationError> {
        self.bindings
            .get(token)
            .cloned()
            .ok_or_else(|| PaginationError::UnboundToken {
                glyph: token.glyph().to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(router: &ActionRouter) -> Vec<&str> {
        router.tokens().iter().map(Token::glyph).collect()
    }

    #[test]
    fn built_in_names_parse() {
        for (name, expected) in [
            ("next", "NextPage"),
            ("NextPage", "NextPage"),
            ("prev", "PrevPage"),
            ("prevpage", "PrevPage"),
            ("prompt", "PromptGoTo"),
            ("goto", "PromptGoTo"),
            ("gotopage", "PromptGoTo"),
            ("ask", "PromptGoTo"),
        ] {
            let action: Action = name.parse().unwrap();
            assert_eq!(format!("{action:?}"), expected, "{name}");
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "skip".parse::<Action>().unwrap_err(),
            PaginationError::UnknownAction {
                name: "skip".to_owned()
            }
        );
    }

    #[test]
    fn binding_keeps_insertion_order() {
        let mut router = ActionRouter::new();
        router
            .bind("prev", Action::PrevPage)
            .bind("1234", Action::PromptGoTo)
            .bind("next", Action::NextPage);

        assert_eq!(glyphs(&router), ["⏮", "🔢", "⏭"]);
    }

    #[test]
    fn rebinding_moves_token_to_end_and_replaces_action() {
        let mut router = ActionRouter::new();
        router
            .bind("next", Action::PrevPage)
            .bind("prev", Action::PrevPage)
            .bind("next", Action::NextPage);

        assert_eq!(glyphs(&router), ["⏮", "⏭"]);
        let action = router.resolve(&Token::new("next")).unwrap();
        assert!(matches!(action, Action::NextPage));
    }

    #[test]
    fn resolving_unbound_token_fails() {
        let mut router = ActionRouter::new();
        router.bind("next", Action::NextPage);

        assert_eq!(
            router.resolve(&Token::new("up")).unwrap_err(),
            PaginationError::UnboundToken {
                glyph: "🔼".to_owned()
            }
        );
    }

    #[test]
    fn unbind_all_clears_order_and_bindings() {
        let mut router = ActionRouter::new();
        router.bind("next", Action::NextPage);
        router.unbind_all();

        assert!(router.tokens().is_empty());
        assert!(router.resolve(&Token::new("next")).is_err());
    }

    #[test]
    fn custom_actions_receive_the_store() {
        let mut router = ActionRouter::new();
        router.bind(
            "rewind",
            Action::custom(|store| {
                store.page_to(1)?;
                Ok(CustomOutcome::Rerender)
            }),
        );

        let Action::Custom(callback) = router.resolve(&Token::new("rewind")).unwrap() else {
            panic!("expected a custom action");
        };

        let mut store = PageStore::new();
        assert!(callback(&mut store).is_err());
    }

    #[test]
    fn token_lookup_ignores_variation_selector() {
        let mut router = ActionRouter::new();
        router.bind("play", Action::NextPage);

        assert_eq!(router.token_for("▶\u{fe0f}"), Some(&Token::new("play")));
        assert_eq!(router.token_for("⏭"), None);
    }
}
