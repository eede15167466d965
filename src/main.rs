//! Anitime bot - anime recommendations and an emoji quiz
//!
//! Serves the bot's conversation logic over HTTP for a chat platform
//! adapter to relay messages through.

mod api;
mod bot;
mod catalog;
mod config;
mod cover;
mod quiz;
mod recommend;

use api::{create_router, AppState};
use bot::Bot;
use catalog::Catalog;
use config::BotConfig;
use cover::{AniListClient, CachedCoverSource, CoverSource, NoCovers};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anitime_bot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = BotConfig::from_env();

    // Content tables
    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog");
            Catalog::from_path(path)?
        }
        None => Catalog::builtin()?,
    };
    let playable = catalog.playable_riddles().len();
    tracing::info!(
        entries = catalog.len(),
        riddles = catalog.riddles().len(),
        playable_riddles = playable,
        greetings = catalog.greetings().len(),
        "Catalog loaded"
    );
    if catalog.is_empty() {
        tracing::warn!("Catalog has no entries; recommendations are unavailable");
    }
    if playable == 0 {
        tracing::warn!("No riddle answers match catalog titles; the quiz will not start");
    }

    // Cover art
    let covers: Arc<dyn CoverSource> = if config.cover_lookup {
        tracing::info!(endpoint = %config.anilist_endpoint, "Cover lookup enabled");
        let client = AniListClient::new(config.anilist_endpoint.clone(), config.cover_timeout)?;
        Arc::new(CachedCoverSource::new(client))
    } else {
        tracing::info!("Cover lookup disabled");
        Arc::new(NoCovers)
    };

    let state = AppState::new(Bot::new(Arc::new(catalog), covers, &config));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Anitime bot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
