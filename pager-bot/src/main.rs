use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use pager_commands::handle_message;
use pager_core::{Config, Context};
use pager_utils::{events::EventHub, pagination::TwilightSurface};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let token = config.discord_token.clone();

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));
    let bot_user = http.current_user().await?.model().await?;
    info!(bot_user_id = bot_user.id.get(), "resolved bot identity");

    // Gateway events reach paged embed sessions through the hub
    let hub = EventHub::new();
    let surface = Arc::new(TwilightSurface::new(
        Arc::clone(&http),
        hub.clone(),
        bot_user.id,
    ));
    let ctx = Context::new(Arc::clone(&http), surface, config);

    // Reactions drive paged embeds; message content feeds commands and page prompts
    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS
        | Intents::MESSAGE_CONTENT;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("Pager is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Pager has successfully awoken!");
            }
            Event::ReactionAdd(reaction) => {
                hub.publish_reaction(&reaction);
            }
            Event::MessageCreate(msg) => {
                hub.publish_message(&msg);
                let channel_id = msg.channel_id.get();
                if let Err(source) = handle_message(ctx.clone(), msg).await {
                    error!(?source, channel_id, "command failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(()) // Return Success, shutdown cleanly
}
