use quiz_core::model::{Question, ValidatedQuestion, next_question_id};
use tracing::debug;

use super::{FileRepository, read_optional, write_whole};
use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

impl FileRepository {
    fn read_records(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let path = &self.paths().questions;
        let Some(raw) = read_optional(path)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display())))
    }
}

impl QuestionRepository for FileRepository {
    fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let questions = self
            .read_records()?
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = questions.len(), "question bank loaded");
        Ok(questions)
    }

    fn append_question(&self, question: ValidatedQuestion) -> Result<Question, StorageError> {
        let mut records = self.read_records()?;
        let existing = records
            .iter()
            .cloned()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        let question = question.assign_id(next_question_id(&existing));
        records.push(QuestionRecord::from_question(&question));

        let raw = serde_json::to_string_pretty(&records).map_err(ser)?;
        write_whole(&self.paths().questions, &raw)?;
        debug!(id = %question.id(), "question appended");
        Ok(question)
    }
}
