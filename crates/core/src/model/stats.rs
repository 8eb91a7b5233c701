use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::answer::AnswerClass;
use crate::model::session::SessionReport;

/// Correct / wrong counters for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTally {
    pub correct: u64,
    pub wrong: u64,
}

impl CategoryTally {
    #[must_use]
    pub fn answered(&self) -> u64 {
        self.correct + self.wrong
    }

    /// Share of correct answers among answered questions, if any were answered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> Option<f64> {
        let answered = self.answered();
        (answered > 0).then(|| self.correct as f64 / answered as f64)
    }
}

/// Running totals across all completed sessions.
///
/// This is a pure fold over session reports; it is never rebuilt from the
/// Result Log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CumulativeStats {
    #[serde(default)]
    pub sessions_completed: u64,
    #[serde(default)]
    pub total_correct: u64,
    #[serde(default)]
    pub total_wrong: u64,
    #[serde(default)]
    pub total_skipped: u64,
    #[serde(default)]
    pub per_category: BTreeMap<String, CategoryTally>,
}

impl CumulativeStats {
    /// Fold one completed session into the totals.
    ///
    /// Skipped questions touch neither category counter, but their category
    /// still gets an entry.
    pub fn fold(&mut self, report: &SessionReport) {
        let tally = report.tally();
        self.sessions_completed += 1;
        self.total_correct += u64::from(tally.correct);
        self.total_wrong += u64::from(tally.wrong);
        self.total_skipped += u64::from(tally.skipped);

        for (question, class) in report.classified() {
            let entry = self
                .per_category
                .entry(question.category().to_owned())
                .or_default();
            match class {
                AnswerClass::Correct => entry.correct += 1,
                AnswerClass::Wrong => entry.wrong += 1,
                AnswerClass::Skipped => {}
            }
        }
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<CategoryTally> {
        self.per_category.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerState, Question, QuestionId};
    use std::time::Duration;

    fn question(id: u64, category: &str) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            format!("Q{id}"),
            vec!["yes".into(), "no".into()],
            0,
            category.into(),
        )
        .unwrap()
    }

    #[test]
    fn fresh_stats_count_all_correct_category() {
        let questions = vec![question(1, "A"), question(2, "A"), question(3, "A")];
        let answers = [AnswerState::Answered(0); 3];
        let report = SessionReport::from_answers(questions, &answers, Duration::ZERO).unwrap();

        let mut stats = CumulativeStats::default();
        stats.fold(&report);

        assert_eq!(stats.sessions_completed, 1);
        assert_eq!(stats.total_correct, 3);
        assert_eq!(
            stats.category("A"),
            Some(CategoryTally {
                correct: 3,
                wrong: 0
            })
        );
    }

    #[test]
    fn skipped_questions_touch_no_category_counter() {
        let questions = vec![question(1, "A"), question(2, "B"), question(3, "B")];
        let answers = [
            AnswerState::Skipped,
            AnswerState::Answered(1),
            AnswerState::Unanswered,
        ];
        let report = SessionReport::from_answers(questions, &answers, Duration::ZERO).unwrap();

        let mut stats = CumulativeStats::default();
        stats.fold(&report);
        stats.fold(&report);

        assert_eq!(stats.sessions_completed, 2);
        assert_eq!(stats.total_skipped, 4);
        assert_eq!(stats.total_wrong, 2);
        assert_eq!(stats.category("A"), Some(CategoryTally::default()));
        assert_eq!(
            stats.category("B"),
            Some(CategoryTally {
                correct: 0,
                wrong: 2
            })
        );
    }

    #[test]
    fn accuracy_is_none_without_answers() {
        assert_eq!(CategoryTally::default().accuracy(), None);
        let tally = CategoryTally {
            correct: 3,
            wrong: 1,
        };
        assert_eq!(tally.accuracy(), Some(0.75));
    }
}
