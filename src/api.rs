//! HTTP API for the Anitime bot
//!
//! A chat platform adapter (or a test client) posts user messages here and
//! delivers the returned replies.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::bot::Bot;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<Bot>,
}

impl AppState {
    pub fn new(bot: Bot) -> Self {
        Self { bot: Arc::new(bot) }
    }
}
