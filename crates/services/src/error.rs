//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SessionReportError};
use storage::repository::StorageError;

use crate::sessions::{InputRejection, MachineError};

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("the question bank is empty")]
    Empty,
    #[error("no questions in category {0:?}")]
    EmptyCategory(String),
    #[error("nothing to recover: the last session had no wrong or skipped questions")]
    NothingToRecover,
    #[error("none of the questions to recover are in the bank anymore")]
    NoRecoveryMatches,
    #[error("question count {requested} is outside {min}-{max}")]
    InvalidCount {
        requested: usize,
        min: usize,
        max: usize,
    },
    #[error(transparent)]
    Report(#[from] SessionReportError),
    #[error(transparent)]
    Machine(#[from] MachineError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A line of session input that changed nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error(transparent)]
    Rejected(#[from] InputRejection),
    #[error(transparent)]
    Machine(#[from] MachineError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
