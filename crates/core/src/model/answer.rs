use crate::model::question::Question;

//
// ─── ANSWER STATE ─────────────────────────────────────────────────────────────
//

/// Per-question answer slot while a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerState {
    /// Not yet answered or skipped; also the state after `Change`.
    #[default]
    Unanswered,
    /// Explicitly skipped with an empty answer.
    Skipped,
    /// Answered with the given 0-based choice index.
    Answered(usize),
}

impl AnswerState {
    /// True once the slot holds an answer or an explicit skip.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, AnswerState::Unanswered)
    }

    /// Collapse the slot into its final classification for `question`.
    ///
    /// A slot still `Unanswered` at finish time counts as skipped.
    #[must_use]
    pub fn classify(self, question: &Question) -> AnswerClass {
        match self {
            AnswerState::Answered(choice) if question.is_correct(choice) => AnswerClass::Correct,
            AnswerState::Answered(_) => AnswerClass::Wrong,
            AnswerState::Skipped | AnswerState::Unanswered => AnswerClass::Skipped,
        }
    }
}

//
// ─── ANSWER CLASS ─────────────────────────────────────────────────────────────
//

/// Final classification of a question once a session has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerClass {
    Correct,
    Wrong,
    Skipped,
}
