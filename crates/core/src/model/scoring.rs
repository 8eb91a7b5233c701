use std::fmt;

use crate::model::answer::AnswerClass;

/// Points awarded for a correct answer.
pub const CORRECT_POINTS: f64 = 1.0;

/// Points awarded (negative) for a wrong answer.
pub const WRONG_PENALTY: f64 = -0.33;

/// Counts of final answer classes for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
}

impl Tally {
    #[must_use]
    pub fn from_classes(classes: impl IntoIterator<Item = AnswerClass>) -> Self {
        let mut tally = Self::default();
        for class in classes {
            tally.record(class);
        }
        tally
    }

    pub fn record(&mut self, class: AnswerClass) {
        match class {
            AnswerClass::Correct => self.correct = self.correct.saturating_add(1),
            AnswerClass::Wrong => self.wrong = self.wrong.saturating_add(1),
            AnswerClass::Skipped => self.skipped = self.skipped.saturating_add(1),
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct + self.wrong + self.skipped
    }

    /// Session score: `correct * 1.0 + wrong * -0.33`; skipped questions are neutral.
    #[must_use]
    pub fn score(&self) -> Score {
        Score {
            points: f64::from(self.correct) * CORRECT_POINTS + f64::from(self.wrong) * WRONG_PENALTY,
            total: self.total(),
        }
    }
}

/// Final score of a session together with its question count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    points: f64,
    total: u32,
}

impl Score {
    #[must_use]
    pub fn new(points: f64, total: u32) -> Self {
        Self { points, total }
    }

    #[must_use]
    pub fn points(&self) -> f64 {
        self.points
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/{}", self.points, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_combines_points_and_penalties() {
        let tally = Tally {
            correct: 3,
            wrong: 2,
            skipped: 4,
        };
        let score = tally.score();
        assert_eq!(score.total(), 9);
        assert!((score.points() - (3.0 - 0.66)).abs() < 1e-9);
        assert_eq!(score.to_string(), "2.34/9");
    }

    #[test]
    fn single_wrong_answer_is_negative() {
        let score = Tally::from_classes([AnswerClass::Wrong]).score();
        assert_eq!(score.to_string(), "-0.33/1");
    }

    #[test]
    fn skips_are_neutral() {
        let tally = Tally::from_classes([AnswerClass::Skipped, AnswerClass::Skipped]);
        assert_eq!(tally.skipped, 2);
        assert_eq!(tally.score().to_string(), "0.00/2");
    }
}
