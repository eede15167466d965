//! Effects produced by quiz transitions

use super::state::{GameState, Round, OPTION_COUNT};
use super::transition::QuizError;

/// Something the host must tell the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A new round is waiting for an answer
    RoundPrompt {
        round: u32,
        total_rounds: u32,
        score: u32,
        /// Rounds finished before this one, the denominator of the running score
        completed: u32,
        puzzle: String,
        options: [String; OPTION_COUNT],
    },

    /// The submitted option was the answer
    Correct,

    /// The submitted option was a distractor
    Incorrect,

    /// All rounds played; the game state is gone
    GameOver { score: u32, total_rounds: u32 },

    /// The player left the game
    Exited,

    /// The catalog cannot produce a valid round
    CatalogNotReady(QuizError),

    /// A round was requested but no game is running
    NotStarted,
}

impl Effect {
    pub fn round_prompt(state: &GameState, round: &Round) -> Self {
        Effect::RoundPrompt {
            round: state.round_index,
            total_rounds: state.total_rounds,
            score: state.score,
            completed: state.completed_rounds(),
            puzzle: round.puzzle.clone(),
            options: round.options.clone(),
        }
    }

    pub fn game_over(state: &GameState) -> Self {
        Effect::GameOver {
            score: state.score,
            total_rounds: state.total_rounds,
        }
    }
}
