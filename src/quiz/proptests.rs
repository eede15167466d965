//! Property-based tests for the quiz engine
//!
//! These tests verify key invariants hold across arbitrary catalogs and
//! event sequences.

use super::*;
use crate::catalog::Catalog;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Something a player might send; option picks are resolved against the
/// round that is active when the action is applied.
#[derive(Debug, Clone)]
enum Action {
    Start,
    Advance,
    PickOption(usize),
    NewRiddle,
    Exit,
    Chat(String),
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => Just(Action::Start),
        1 => Just(Action::Advance),
        6 => (0..OPTION_COUNT).prop_map(Action::PickOption),
        1 => Just(Action::NewRiddle),
        1 => Just(Action::Exit),
        1 => "[a-z ]{0,12}".prop_map(Action::Chat),
    ]
}

/// Catalog with `titles` distinct titles and riddles pointing at a mix of
/// real and unknown answers (answers may repeat).
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (0usize..9, proptest::collection::vec(0usize..12, 0..10)).prop_map(|(titles, answers)| {
        let names: Vec<String> = (0..titles).map(|i| format!("T{i}")).collect();
        let answers: Vec<String> = answers.into_iter().map(|i| format!("T{i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let riddles: Vec<(&str, &str)> = answers.iter().map(|a| ("🎲", a.as_str())).collect();
        Catalog::for_tests(&name_refs, &riddles)
    })
}

fn to_event(action: &Action, state: Option<&GameState>, total_rounds: u32) -> Event {
    match action {
        Action::Start => Event::StartGame { total_rounds },
        Action::Advance => Event::AdvanceRound,
        Action::PickOption(i) => {
            let text = state
                .and_then(|s| s.current.as_ref())
                .map_or_else(String::new, |r| r.options[*i].clone());
            Event::submit(text)
        }
        Action::NewRiddle => Event::submit(NEW_RIDDLE_PHRASE),
        Action::Exit => Event::submit(EXIT_PHRASE),
        Action::Chat(text) => Event::submit(text.clone()),
    }
}

fn distinct_playable_answers(catalog: &Catalog) -> usize {
    catalog
        .playable_riddles()
        .iter()
        .map(|r| r.answer.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn check_invariants(state: &GameState, catalog: &Catalog) -> Result<(), TestCaseError> {
    prop_assert!(state.score <= state.round_index, "score above round: {:?}", state);
    prop_assert!(state.round_index <= state.total_rounds, "round above total: {:?}", state);
    prop_assert_eq!(state.used_answers.len(), state.round_index as usize);

    if let Some(round) = &state.current {
        let distinct: HashSet<&String> = round.options.iter().collect();
        prop_assert_eq!(distinct.len(), OPTION_COUNT);
        prop_assert!(round.is_option(&round.answer));
        prop_assert!(catalog.contains_title(&round.answer));
        prop_assert_eq!(state.used_answers.last(), Some(&round.answer));
    }

    if distinct_playable_answers(catalog) >= state.total_rounds as usize {
        let unique: HashSet<&String> = state.used_answers.iter().collect();
        prop_assert_eq!(unique.len(), state.used_answers.len(), "repeat with large pool");
    }
    Ok(())
}

proptest! {
    // Invariant 1: score <= round <= total, options well formed, no repeats
    #[test]
    fn prop_invariants_hold_for_any_sequence(
        catalog in arb_catalog(),
        seed in any::<u64>(),
        total_rounds in 1u32..8,
        actions in proptest::collection::vec(arb_action(), 1..40)
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state: Option<GameState> = None;

        for action in &actions {
            let event = to_event(action, state.as_ref(), total_rounds);
            state = transition(state, &catalog, &mut rng, event).new_state;
            if let Some(s) = &state {
                check_invariants(s, &catalog)?;
            }
        }
    }

    // Invariant 2: text outside the options never changes progress
    #[test]
    fn prop_non_option_text_is_ignored(
        seed in any::<u64>(),
        text in "[a-z ]{0,12}"
    ) {
        let catalog = Catalog::for_tests(&["Alpha", "Beta", "Gamma", "Delta"], &[("x", "Alpha")]);
        let mut rng = StdRng::seed_from_u64(seed);
        let before = transition(None, &catalog, &mut rng, Event::StartGame { total_rounds: 5 })
            .new_state
            .unwrap();

        let result = transition(Some(before.clone()), &catalog, &mut rng, Event::submit(text));
        prop_assert!(result.effects.is_empty());
        prop_assert_eq!(result.new_state, Some(before));
    }

    // Invariant 3: starting over always resets the score
    #[test]
    fn prop_restart_resets_score(
        seed in any::<u64>(),
        correct in 0usize..4
    ) {
        let catalog = Catalog::for_tests(&["A", "B", "C", "D", "E"], &[("1", "A"), ("2", "B"), ("3", "C")]);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = transition(None, &catalog, &mut rng, Event::StartGame { total_rounds: 5 }).new_state;

        for _ in 0..correct {
            let answer = state.as_ref().and_then(|s| s.current.as_ref()).unwrap().answer.clone();
            state = transition(state, &catalog, &mut rng, Event::submit(answer)).new_state;
        }
        prop_assert_eq!(state.as_ref().unwrap().score as usize, correct);

        let restarted = transition(state, &catalog, &mut rng, Event::StartGame { total_rounds: 5 })
            .new_state
            .unwrap();
        prop_assert_eq!(restarted.score, 0);
        prop_assert_eq!(restarted.round_index, 1);
    }

    // Invariant 4: catalogs below four titles never yield a round
    #[test]
    fn prop_small_catalog_never_plays(
        titles in 0usize..4,
        seed in any::<u64>(),
        actions in proptest::collection::vec(arb_action(), 1..10)
    ) {
        let names: Vec<String> = (0..titles).map(|i| format!("T{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let riddles: Vec<(&str, &str)> = refs.iter().map(|t| ("?", *t)).collect();
        let catalog = Catalog::for_tests(&refs, &riddles);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut state: Option<GameState> = None;
        for action in &actions {
            let event = to_event(action, state.as_ref(), 5);
            let result = transition(state, &catalog, &mut rng, event);
            let prompted = result.effects.iter().any(|e| matches!(e, Effect::RoundPrompt { .. }));
            prop_assert!(!prompted, "round prompted with {} titles", titles);
            state = result.new_state;
            if let Some(s) = &state {
                prop_assert_eq!(s.round_index, 0);
                prop_assert!(s.current.is_none());
            }
        }
    }
}
