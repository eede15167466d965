//! Quiz game state types

/// Rounds per game unless configured otherwise
pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;

/// Options shown per round (the answer plus three distractors)
pub const OPTION_COUNT: usize = 4;

/// A round awaiting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub puzzle: String,
    pub answer: String,
    /// Display order; exactly one equals `answer`
    pub options: [String; OPTION_COUNT],
}

impl Round {
    pub fn is_option(&self, text: &str) -> bool {
        self.options.iter().any(|o| o == text)
    }

    pub fn is_answer(&self, text: &str) -> bool {
        self.answer == text
    }
}

/// Per-conversation game progress
///
/// Invariant: `score <= round_index <= total_rounds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub round_index: u32,
    pub total_rounds: u32,
    pub score: u32,
    /// Answers already presented, in order
    pub used_answers: Vec<String>,
    pub current: Option<Round>,
}

impl GameState {
    pub fn new(total_rounds: u32) -> Self {
        Self {
            round_index: 0,
            total_rounds: total_rounds.max(1),
            score: 0,
            used_answers: Vec::new(),
            current: None,
        }
    }

    /// Rounds answered or skipped before the current one
    pub fn completed_rounds(&self) -> u32 {
        self.round_index.saturating_sub(1)
    }

    pub fn is_over(&self) -> bool {
        self.round_index >= self.total_rounds
    }

    pub fn has_used(&self, answer: &str) -> bool {
        self.used_answers.iter().any(|a| a == answer)
    }
}
