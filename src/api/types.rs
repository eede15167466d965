//! API request and response types

use crate::bot::{IncomingMessage, OutgoingMessage};
use crate::catalog::CatalogEntry;
use crate::quiz::{GameState, OPTION_COUNT};
use serde::{Deserialize, Serialize};

/// A user message relayed from the chat platform
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: Option<String>,
    pub caption: Option<String>,
    /// Photo size variants as file ids, smallest first
    #[serde(default)]
    pub photos: Vec<String>,
}

impl MessageRequest {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.caption.is_none() && self.photos.is_empty()
    }
}

impl From<MessageRequest> for IncomingMessage {
    fn from(request: MessageRequest) -> Self {
        Self {
            text: request.text,
            caption: request.caption,
            photos: request.photos,
        }
    }
}

/// Replies to deliver, in order
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub messages: Vec<OutgoingMessage>,
}

/// Progress of a running game.
///
/// The answer of the live round is never exposed.
#[derive(Debug, Serialize)]
pub struct GameSnapshot {
    pub round_index: u32,
    pub total_rounds: u32,
    pub score: u32,
    pub completed_rounds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puzzle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<[String; OPTION_COUNT]>,
}

impl From<GameState> for GameSnapshot {
    fn from(game: GameState) -> Self {
        let completed_rounds = game.completed_rounds();
        let (puzzle, options) = match game.current {
            Some(round) => (Some(round.puzzle), Some(round.options)),
            None => (None, None),
        };
        Self {
            round_index: game.round_index,
            total_rounds: game.total_rounds,
            score: game.score,
            completed_rounds,
            puzzle,
            options,
        }
    }
}

/// Loaded content tables.
///
/// Riddles are only counted; listing them would give away the answers.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub entries: Vec<CatalogEntry>,
    pub riddles: usize,
    pub playable_riddles: usize,
    pub quiz_ready: bool,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
