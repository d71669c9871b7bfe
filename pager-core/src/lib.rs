use std::sync::Arc;

use twilight_http::Client;

use pager_utils::pagination::TwilightSurface;

/// Environment-driven bot configuration.
pub mod config;

pub use config::Config;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone, Debug)]
pub struct Context {
    pub http: Arc<Client>,
    /// Paged embed surface over `http` and the gateway event hub.
    pub surface: Arc<TwilightSurface>,
    pub config: Arc<Config>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, surface: Arc<TwilightSurface>, config: Config) -> Self {
        Self {
            http,
            surface,
            config: Arc::new(config),
        }
    }
}
