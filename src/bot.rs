//! Message router
//!
//! Turns one incoming chat message into the replies for it. Commands are
//! handled here; anything else goes to the quiz engine when the conversation
//! has a session.

mod command;
mod reply;
mod session;

pub use command::Command;
pub use reply::{Keyboard, OutgoingMessage};
pub use session::SessionRegistry;

use crate::catalog::Catalog;
use crate::config::BotConfig;
use crate::cover::{lookup_cover, CoverSource};
use crate::quiz::{transition, Effect, Event, GameState};
use command::looks_like_command;
use rand::seq::SliceRandom;
use reply::{
    greeting_text, photo_id_text, recommendation_caption, recommendation_messages, render_effect,
    EMPTY_CATALOG_TEXT, HELP_TEXT, PHOTO_ID_HINT, START_TEXT,
};
use std::sync::Arc;
use std::time::Duration;

/// One message from a user
#[derive(Debug, Clone, Default)]
pub struct IncomingMessage {
    pub text: Option<String>,
    pub caption: Option<String>,
    /// File ids of an attached photo, smallest size first
    pub photos: Vec<String>,
}

impl IncomingMessage {
    /// Buttons and slash commands come from text, `/photoid` from a caption
    fn command(&self) -> Option<Command> {
        match (&self.text, &self.caption) {
            (Some(text), _) => Command::parse(text),
            (None, Some(caption)) => Command::parse_caption(caption),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
impl IncomingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

pub struct Bot {
    catalog: Arc<Catalog>,
    covers: Arc<dyn CoverSource>,
    sessions: SessionRegistry,
    quiz_rounds: u32,
    cover_timeout: Duration,
}

impl Bot {
    pub fn new(catalog: Arc<Catalog>, covers: Arc<dyn CoverSource>, config: &BotConfig) -> Self {
        Self {
            catalog,
            covers,
            sessions: SessionRegistry::new(config.rng_seed),
            quiz_rounds: config.quiz_rounds,
            cover_timeout: config.cover_timeout,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle a message and return the replies, in delivery order.
    pub async fn handle(&self, conv_id: &str, message: &IncomingMessage) -> Vec<OutgoingMessage> {
        if let Some(command) = message.command() {
            tracing::debug!(conv_id = %conv_id, command = ?command, "Handling command");
            return self.run_command(conv_id, command, message).await;
        }

        match message.text.as_deref() {
            Some(text) if !looks_like_command(text) => self.submit_answer(conv_id, text).await,
            _ => vec![],
        }
    }

    /// Active game for a conversation, if any
    pub async fn game(&self, conv_id: &str) -> Option<GameState> {
        let session = self.sessions.get(conv_id).await?;
        let game = session.lock().await.game.clone();
        game
    }

    /// Drop everything known about a conversation
    pub async fn forget(&self, conv_id: &str) -> bool {
        let removed = self.sessions.remove(conv_id).await;
        if removed {
            let remaining = self.sessions.len().await;
            tracing::info!(conv_id = %conv_id, remaining, "Session forgotten");
        }
        removed
    }

    async fn run_command(
        &self,
        conv_id: &str,
        command: Command,
        message: &IncomingMessage,
    ) -> Vec<OutgoingMessage> {
        match command {
            Command::Start => vec![OutgoingMessage::with_keyboard(START_TEXT, Keyboard::main())],
            Command::Help => vec![OutgoingMessage::text(HELP_TEXT)],
            Command::Greeting => vec![OutgoingMessage::text(self.greeting(conv_id).await)],
            Command::Anime => self.recommend(conv_id).await,
            Command::Game => {
                let event = Event::StartGame {
                    total_rounds: self.quiz_rounds,
                };
                self.apply(conv_id, event).await
            }
            Command::PhotoId => match message.photos.last() {
                Some(file_id) => vec![OutgoingMessage::text(photo_id_text(file_id))],
                None => vec![OutgoingMessage::text(PHOTO_ID_HINT)],
            },
        }
    }

    async fn submit_answer(&self, conv_id: &str, text: &str) -> Vec<OutgoingMessage> {
        // Plain chatter must not create sessions
        if self.sessions.get(conv_id).await.is_none() {
            return vec![];
        }
        self.apply(conv_id, Event::submit(text)).await
    }

    /// Run a quiz transition under the session lock and render its effects.
    async fn apply(&self, conv_id: &str, event: Event) -> Vec<OutgoingMessage> {
        let session = self.sessions.get_or_create(conv_id).await;
        let mut session = session.lock().await;
        let session = &mut *session;

        let result = transition(session.game.take(), &self.catalog, &mut session.rng, event);
        session.game = result.new_state;

        if let Some(game) = &session.game {
            tracing::debug!(
                conv_id = %conv_id,
                round = game.round_index,
                total_rounds = game.total_rounds,
                score = game.score,
                effects = result.effects.len(),
                "Quiz transition"
            );
        } else if !result.effects.is_empty() {
            tracing::info!(conv_id = %conv_id, "Quiz ended");
        }
        for effect in &result.effects {
            if let Effect::CatalogNotReady(reason) = effect {
                tracing::warn!(conv_id = %conv_id, reason = %reason, "Quiz unavailable");
            }
        }

        result.effects.iter().map(render_effect).collect()
    }

    async fn greeting(&self, conv_id: &str) -> String {
        let session = self.sessions.get_or_create(conv_id).await;
        let mut session = session.lock().await;
        greeting_text(self.catalog.greetings().choose(&mut session.rng))
    }

    async fn recommend(&self, conv_id: &str) -> Vec<OutgoingMessage> {
        let picked = {
            let session = self.sessions.get_or_create(conv_id).await;
            let mut session = session.lock().await;
            let session = &mut *session;
            session.cycle.next_index(self.catalog.len(), &mut session.rng)
        };

        let Some(entry) = picked.and_then(|idx| self.catalog.entry(idx)) else {
            return vec![OutgoingMessage::text(EMPTY_CATALOG_TEXT)];
        };

        let photo_url = match &entry.photo_url {
            Some(url) => Some(url.clone()),
            None => lookup_cover(self.covers.as_ref(), &entry.title, self.cover_timeout).await,
        };
        tracing::info!(
            conv_id = %conv_id,
            title = %entry.title,
            has_photo = photo_url.is_some(),
            "Recommending"
        );

        recommendation_messages(recommendation_caption(entry), photo_url)
    }
}
