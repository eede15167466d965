//! Pure quiz transition function
//!
//! Given the same state, catalog, event and RNG seed, a transition always
//! produces the same result. No I/O happens here.

use super::event::{EXIT_PHRASE, NEW_RIDDLE_PHRASE};
use super::state::{GameState, Round, OPTION_COUNT};
use super::{Effect, Event};
use crate::catalog::{Catalog, Riddle};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Result of a quiz transition
#[derive(Debug)]
pub struct TransitionResult {
    /// `None` when no game should remain for the conversation
    pub new_state: Option<GameState>,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: Option<GameState>) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Why the catalog cannot produce a round
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("catalog has {titles} titles, at least {OPTION_COUNT} are needed")]
    TooFewTitles { titles: usize },
    #[error("catalog has no playable riddles")]
    NoPlayableRiddles,
}

/// Apply an event to a conversation's game.
pub fn transition<R: Rng + ?Sized>(
    state: Option<GameState>,
    catalog: &Catalog,
    rng: &mut R,
    event: Event,
) -> TransitionResult {
    match (state, event) {
        // A new game always replaces the old one
        (_, Event::StartGame { total_rounds }) => {
            advance_round(GameState::new(total_rounds), catalog, rng, vec![])
        }

        (None, Event::AdvanceRound) => TransitionResult::new(None).with_effect(Effect::NotStarted),

        (Some(state), Event::AdvanceRound) => advance_round(state, catalog, rng, vec![]),

        // Outside a game every message is ordinary chat
        (None, Event::SubmitAnswer { .. }) => TransitionResult::new(None),

        (Some(state), Event::SubmitAnswer { text }) => submit_answer(state, catalog, rng, text.trim()),
    }
}

enum Verdict {
    Correct,
    Wrong,
    NotAnOption,
}

fn submit_answer<R: Rng + ?Sized>(
    mut state: GameState,
    catalog: &Catalog,
    rng: &mut R,
    text: &str,
) -> TransitionResult {
    if text == NEW_RIDDLE_PHRASE {
        return advance_round(state, catalog, rng, vec![]);
    }
    if text == EXIT_PHRASE {
        return TransitionResult::new(None).with_effect(Effect::Exited);
    }

    let verdict = match &state.current {
        Some(round) if round.is_answer(text) => Verdict::Correct,
        Some(round) if round.is_option(text) => Verdict::Wrong,
        _ => Verdict::NotAnOption,
    };

    match verdict {
        Verdict::Correct => {
            state.score += 1;
            // The round is settled even if the next one cannot be built
            state.current = None;
            advance_round(state, catalog, rng, vec![Effect::Correct])
        }
        Verdict::Wrong => TransitionResult::new(Some(state)).with_effect(Effect::Incorrect),
        Verdict::NotAnOption => TransitionResult::new(Some(state)),
    }
}

/// Finish the game or start its next round.
///
/// A round that cannot be built leaves `state` untouched: the round counter
/// is only incremented once the new round exists.
fn advance_round<R: Rng + ?Sized>(
    mut state: GameState,
    catalog: &Catalog,
    rng: &mut R,
    mut effects: Vec<Effect>,
) -> TransitionResult {
    if let Err(e) = check_catalog(catalog) {
        effects.push(Effect::CatalogNotReady(e));
        return TransitionResult {
            new_state: Some(state),
            effects,
        };
    }

    if state.is_over() {
        effects.push(Effect::game_over(&state));
        return TransitionResult {
            new_state: None,
            effects,
        };
    }

    match build_round(&state, catalog, rng) {
        Ok(round) => {
            state.round_index += 1;
            state.used_answers.push(round.answer.clone());
            effects.push(Effect::round_prompt(&state, &round));
            state.current = Some(round);
        }
        Err(e) => effects.push(Effect::CatalogNotReady(e)),
    }

    TransitionResult {
        new_state: Some(state),
        effects,
    }
}

fn check_catalog(catalog: &Catalog) -> Result<(), QuizError> {
    // Titles are unique, so the entry count is the distinct title count
    if catalog.len() < OPTION_COUNT {
        return Err(QuizError::TooFewTitles {
            titles: catalog.len(),
        });
    }
    if catalog.playable_riddles().is_empty() {
        return Err(QuizError::NoPlayableRiddles);
    }
    Ok(())
}

fn build_round<R: Rng + ?Sized>(
    state: &GameState,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Round, QuizError> {
    let playable = catalog.playable_riddles();
    let unused: Vec<&Riddle> = playable
        .iter()
        .copied()
        .filter(|r| !state.has_used(&r.answer))
        .collect();

    // Repeats are allowed once every playable answer has been shown
    let pool = if unused.is_empty() { &playable } else { &unused };
    let riddle = pool.choose(rng).ok_or(QuizError::NoPlayableRiddles)?;

    let distractors: Vec<&str> = catalog.titles().filter(|t| *t != riddle.answer).collect();
    if distractors.len() < DISTRACTOR_COUNT {
        return Err(QuizError::TooFewTitles {
            titles: catalog.len(),
        });
    }

    let mut options: Vec<String> = distractors
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|t| (*t).to_string())
        .collect();
    options.push(riddle.answer.clone());
    options.shuffle(rng);

    let options: [String; OPTION_COUNT] = options.try_into().map_err(|_| QuizError::TooFewTitles {
        titles: catalog.len(),
    })?;

    Ok(Round {
        puzzle: riddle.puzzle.clone(),
        answer: riddle.answer.clone(),
        options,
    })
}
