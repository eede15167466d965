//! Emoji quiz engine
//!
//! A round-based multiple-choice game: the player sees an emoji riddle and
//! picks the matching title out of four options. Transitions are pure; the
//! caller owns the state, the catalog and the random source and executes the
//! returned effects.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, EXIT_PHRASE, NEW_RIDDLE_PHRASE};
#[allow(unused_imports)] // Public API re-exports
pub use state::{GameState, Round, DEFAULT_TOTAL_ROUNDS, OPTION_COUNT};
#[allow(unused_imports)] // Public API re-exports
pub use transition::{transition, QuizError, TransitionResult};
