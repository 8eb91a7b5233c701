use std::sync::Arc;

use quiz_core::model::{Question, QuestionDraft, QuestionId};
use storage::repository::QuestionRepository;
use tracing::info;

use crate::error::QuestionServiceError;
use crate::sessions::distinct_categories;

/// Orchestrates question creation and bank queries.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Validate a draft and append it to the bank with the next free id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for validation failures.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub fn add_question(&self, draft: QuestionDraft) -> Result<QuestionId, QuestionServiceError> {
        let validated = draft.validate()?;
        let question = self.questions.append_question(validated)?;
        info!(id = %question.id(), category = question.category(), "question added");
        Ok(question.id())
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the bank cannot be read.
    pub fn list_questions(&self) -> Result<Vec<Question>, QuestionServiceError> {
        Ok(self.questions.list_questions()?)
    }

    /// Sorted distinct categories of the bank.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the bank cannot be read.
    pub fn categories(&self) -> Result<Vec<String>, QuestionServiceError> {
        Ok(distinct_categories(&self.questions.list_questions()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionError;
    use storage::InMemoryRepository;

    fn draft(text: &str, category: &str) -> QuestionDraft {
        QuestionDraft {
            text: text.into(),
            choices: vec!["yes".into(), "no".into()],
            correct_index: 1,
            category: category.into(),
        }
    }

    #[test]
    fn add_question_assigns_next_id() {
        let service = QuestionService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.add_question(draft("one", "B")).unwrap(), QuestionId::new(1));
        assert_eq!(service.add_question(draft("two", "A")).unwrap(), QuestionId::new(2));
        assert_eq!(service.categories().unwrap(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn invalid_draft_is_not_stored() {
        let service = QuestionService::new(Arc::new(InMemoryRepository::new()));
        let mut bad = draft("q", "A");
        bad.correct_index = 2;

        let err = service.add_question(bad).unwrap_err();
        assert!(matches!(
            err,
            QuestionServiceError::Question(QuestionError::CorrectIndexOutOfRange { .. })
        ));
        assert!(service.list_questions().unwrap().is_empty());
    }
}
