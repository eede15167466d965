//! Events that drive a quiz game

/// Reply-keyboard button that skips to a new riddle
pub const NEW_RIDDLE_PHRASE: &str = "🔄 Новая загадка";

/// Reply-keyboard button that leaves the game
pub const EXIT_PHRASE: &str = "⛔ Выход";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a fresh game, discarding any game in progress
    StartGame { total_rounds: u32 },
    /// Move on to the next round (or finish the game)
    #[allow(dead_code)] // The bot advances through NEW_RIDDLE_PHRASE answers
    AdvanceRound,
    /// Free text from the conversation while a game may be running
    SubmitAnswer { text: String },
}

impl Event {
    pub fn submit(text: impl Into<String>) -> Self {
        Event::SubmitAnswer { text: text.into() }
    }
}
