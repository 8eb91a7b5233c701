use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("maximum questions per quiz must be > 0")]
    InvalidMaxQuestions,

    #[error("maximum balanced categories must be > 0")]
    InvalidMaxBalancedCategories,
}

/// Limits applied when building a full-bank quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    max_questions: usize,
    max_balanced_categories: usize,
}

impl QuizSettings {
    pub const DEFAULT_MAX_QUESTIONS: usize = 33;
    pub const DEFAULT_MAX_BALANCED_CATEGORIES: usize = 15;

    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns error if any limit is zero.
    pub fn new(max_questions: usize, max_balanced_categories: usize) -> Result<Self, SettingsError> {
        if max_questions == 0 {
            return Err(SettingsError::InvalidMaxQuestions);
        }
        if max_balanced_categories == 0 {
            return Err(SettingsError::InvalidMaxBalancedCategories);
        }
        Ok(Self {
            max_questions,
            max_balanced_categories,
        })
    }

    /// Upper bound of the count prompt: at most 33 questions, never more than the bank holds.
    #[must_use]
    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    #[must_use]
    pub fn max_balanced_categories(&self) -> usize {
        self.max_balanced_categories
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_questions: Self::DEFAULT_MAX_QUESTIONS,
            max_balanced_categories: Self::DEFAULT_MAX_BALANCED_CATEGORIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_limits() {
        let settings = QuizSettings::default();
        assert_eq!(settings.max_questions(), 33);
        assert_eq!(settings.max_balanced_categories(), 15);
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert_eq!(QuizSettings::new(0, 5).unwrap_err(), SettingsError::InvalidMaxQuestions);
        assert_eq!(
            QuizSettings::new(5, 0).unwrap_err(),
            SettingsError::InvalidMaxBalancedCategories
        );
    }
}
