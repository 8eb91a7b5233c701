use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

use crate::model::answer::{AnswerClass, AnswerState};
use crate::model::ids::QuestionId;
use crate::model::question::Question;
use crate::model::scoring::{Score, Tally};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionReportError {
    #[error("session has no questions")]
    Empty,

    #[error("{answers} answer slots for {questions} questions")]
    LengthMismatch { questions: usize, answers: usize },
}

//
// ─── SESSION REPORT ───────────────────────────────────────────────────────────
//

/// Finalized result of one session: the question set plus its wrong and skipped ids.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    questions: Vec<Question>,
    classes: Vec<AnswerClass>,
    wrong_ids: BTreeSet<QuestionId>,
    skipped_ids: BTreeSet<QuestionId>,
    tally: Tally,
    elapsed: Duration,
}

impl SessionReport {
    /// Finalize a session from its questions and their answer slots (same order).
    ///
    /// Slots still `Unanswered` are recorded as skipped.
    ///
    /// # Errors
    ///
    /// Returns `SessionReportError::Empty` for an empty session and
    /// `SessionReportError::LengthMismatch` if slot and question counts differ.
    pub fn from_answers(
        questions: Vec<Question>,
        answers: &[AnswerState],
        elapsed: Duration,
    ) -> Result<Self, SessionReportError> {
        if questions.is_empty() {
            return Err(SessionReportError::Empty);
        }
        if questions.len() != answers.len() {
            return Err(SessionReportError::LengthMismatch {
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        let classes: Vec<AnswerClass> = questions
            .iter()
            .zip(answers)
            .map(|(question, state)| state.classify(question))
            .collect();

        let mut wrong_ids = BTreeSet::new();
        let mut skipped_ids = BTreeSet::new();
        for (question, class) in questions.iter().zip(&classes) {
            match class {
                AnswerClass::Wrong => {
                    wrong_ids.insert(question.id());
                }
                AnswerClass::Skipped => {
                    skipped_ids.insert(question.id());
                }
                AnswerClass::Correct => {}
            }
        }

        let tally = Tally::from_classes(classes.iter().copied());
        Ok(Self {
            questions,
            classes,
            wrong_ids,
            skipped_ids,
            tally,
            elapsed,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions paired with their final classification, in session order.
    pub fn classified(&self) -> impl Iterator<Item = (&Question, AnswerClass)> {
        self.questions.iter().zip(self.classes.iter().copied())
    }

    #[must_use]
    pub fn wrong_ids(&self) -> &BTreeSet<QuestionId> {
        &self.wrong_ids
    }

    #[must_use]
    pub fn skipped_ids(&self) -> &BTreeSet<QuestionId> {
        &self.skipped_ids
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.tally.score()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.tally.total()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Distinct categories covered by this session.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<String> {
        self.questions
            .iter()
            .map(|q| q.category().to_owned())
            .collect()
    }
}

//
// ─── SESSION OUTCOME ──────────────────────────────────────────────────────────
//

/// One Result Log entry. Written once per completed session and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    pub total: u32,
    #[serde(default)]
    pub wrong_ids: BTreeSet<QuestionId>,
    #[serde(default)]
    pub skipped_ids: BTreeSet<QuestionId>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub elapsed_secs: u64,
}

impl SessionOutcome {
    #[must_use]
    pub fn from_report(report: &SessionReport, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            score: report.score().points(),
            total: report.total(),
            wrong_ids: report.wrong_ids().clone(),
            skipped_ids: report.skipped_ids().clone(),
            categories: report.categories(),
            elapsed_secs: report.elapsed().as_secs(),
        }
    }

    /// Ids to revisit in a recovery quiz: union of wrong and skipped ids.
    #[must_use]
    pub fn recovery_ids(&self) -> BTreeSet<QuestionId> {
        self.wrong_ids.union(&self.skipped_ids).copied().collect()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        Score::new(self.score, self.total)
    }
}
