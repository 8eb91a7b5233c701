use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question category cannot be empty")]
    EmptyCategory,

    #[error("a question needs at least one choice")]
    NoChoices,

    #[error("choice {index} is empty")]
    EmptyChoice { index: usize },

    #[error("correct index {index} is out of range for {len} choices")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Editor input for a new question, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub category: String,
}

impl QuestionDraft {
    /// Validate the draft and trim its text fields.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if text, category or choices are empty, or the
    /// correct index does not point at a choice.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let text = self.text.trim().to_owned();
        let category = self.category.trim().to_owned();
        let choices: Vec<String> = self
            .choices
            .into_iter()
            .map(|c| c.trim().to_owned())
            .collect();
        check_fields(&text, &category, &choices, self.correct_index)?;

        Ok(ValidatedQuestion {
            text,
            choices,
            correct_index: self.correct_index,
            category,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    text: String,
    choices: Vec<String>,
    correct_index: usize,
    category: String,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            choices: self.choices,
            correct_index: self.correct_index,
            category: self.category,
        }
    }
}

/// A multiple-choice question from the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    choices: Vec<String>,
    correct_index: usize,
    category: String,
}

impl Question {
    /// Rehydrate a question from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the stored record breaks a question invariant.
    pub fn from_persisted(
        id: QuestionId,
        text: String,
        choices: Vec<String>,
        correct_index: usize,
        category: String,
    ) -> Result<Self, QuestionError> {
        check_fields(&text, &category, &choices, correct_index)?;
        Ok(Self {
            id,
            text,
            choices,
            correct_index,
            category,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct choice.
    #[must_use]
    pub fn correct_choice(&self) -> &str {
        &self.choices[self.correct_index]
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn is_correct(&self, choice_index: usize) -> bool {
        choice_index == self.correct_index
    }
}

/// Next id to assign in a bank: one past the highest existing id, starting at 1.
#[must_use]
pub fn next_question_id<'a>(questions: impl IntoIterator<Item = &'a Question>) -> QuestionId {
    questions
        .into_iter()
        .map(Question::id)
        .max()
        .map_or_else(|| QuestionId::new(1), |max| max.next())
}

fn check_fields(
    text: &str,
    category: &str,
    choices: &[String],
    correct_index: usize,
) -> Result<(), QuestionError> {
    if text.trim().is_empty() {
        return Err(QuestionError::EmptyText);
    }
    if category.trim().is_empty() {
        return Err(QuestionError::EmptyCategory);
    }
    if choices.is_empty() {
        return Err(QuestionError::NoChoices);
    }
    if let Some(index) = choices.iter().position(|c| c.trim().is_empty()) {
        return Err(QuestionError::EmptyChoice { index });
    }
    if correct_index >= choices.len() {
        return Err(QuestionError::CorrectIndexOutOfRange {
            index: correct_index,
            len: choices.len(),
        });
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(choices: &[&str], correct_index: usize) -> QuestionDraft {
        QuestionDraft {
            text: "  Which keyword declares a constant?  ".into(),
            choices: choices.iter().map(|c| (*c).to_string()).collect(),
            correct_index,
            category: " Rust ".into(),
        }
    }

    #[test]
    fn valid_draft_trims_and_assigns_id() {
        let question = draft(&["let", "const "], 1)
            .validate()
            .unwrap()
            .assign_id(QuestionId::new(4));

        assert_eq!(question.id(), QuestionId::new(4));
        assert_eq!(question.text(), "Which keyword declares a constant?");
        assert_eq!(question.category(), "Rust");
        assert_eq!(question.correct_choice(), "const");
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn draft_without_choices_fails() {
        let err = draft(&[], 0).validate().unwrap_err();
        assert_eq!(err, QuestionError::NoChoices);
    }

    #[test]
    fn draft_with_out_of_range_index_fails() {
        let err = draft(&["a", "b"], 2).validate().unwrap_err();
        assert_eq!(err, QuestionError::CorrectIndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn draft_with_blank_category_fails() {
        let mut d = draft(&["a"], 0);
        d.category = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyCategory);
    }

    #[test]
    fn persisted_question_is_checked() {
        let err = Question::from_persisted(
            QuestionId::new(1),
            "Q".into(),
            vec!["a".into(), " ".into()],
            0,
            "A".into(),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyChoice { index: 1 });
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let make = |id| {
            Question::from_persisted(QuestionId::new(id), "Q".into(), vec!["a".into()], 0, "A".into())
                .unwrap()
        };
        let bank = vec![make(3), make(9), make(1)];
        assert_eq!(next_question_id(&bank), QuestionId::new(10));
        assert_eq!(next_question_id(&Vec::<Question>::new()), QuestionId::new(1));
    }
}
