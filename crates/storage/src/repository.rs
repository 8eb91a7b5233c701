use quiz_core::model::{
    CumulativeStats, Question, QuestionError, QuestionId, SessionOutcome, Topic, ValidatedQuestion,
    next_question_id,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::log_format;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid question {id}: {source}")]
    InvalidQuestion {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },
}

/// Persisted shape for a question.
///
/// Keeps serde out of the domain type; `into_question` re-checks the invariants
/// a hand-edited bank file may break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub text: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub category: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id(),
            text: question.text().to_owned(),
            choices: question.choices().to_vec(),
            correct_index: question.correct_index(),
            category: question.category().to_owned(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidQuestion` if the record breaks a question invariant.
    pub fn into_question(self) -> Result<Question, StorageError> {
        let id = self.id;
        Question::from_persisted(
            self.id,
            self.text,
            self.choices,
            self.correct_index,
            self.category,
        )
        .map_err(|source| StorageError::InvalidQuestion { id, source })
    }
}

/// Read access to the question bank plus the editor's append path.
pub trait QuestionRepository: Send + Sync {
    /// Load the whole bank in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read or holds an invalid record.
    fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Append a question with id `max(existing) + 1`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read or written.
    fn append_question(&self, question: ValidatedQuestion) -> Result<Question, StorageError>;
}

/// Append-only log of session outcomes.
pub trait ResultLogRepository: Send + Sync {
    /// Append one outcome record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be serialized or written.
    fn append_outcome(&self, outcome: &SessionOutcome) -> Result<(), StorageError>;

    /// Most recent outcome, or `None` if the log is empty or its last record is malformed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the log exists but cannot be read.
    fn latest_outcome(&self) -> Result<Option<SessionOutcome>, StorageError>;
}

/// Single cumulative statistics record, read-modify-write.
pub trait StatsRepository: Send + Sync {
    /// Load the statistics; missing or malformed data yields the default.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when existing data cannot be read.
    fn load_stats(&self) -> Result<CumulativeStats, StorageError>;

    /// Replace the stored statistics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the statistics cannot be written.
    fn save_stats(&self, stats: &CumulativeStats) -> Result<(), StorageError>;
}

/// Theory notes for the study viewer.
pub trait TopicRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the topics cannot be read.
    fn list_topics(&self) -> Result<Vec<Topic>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// The result log is kept as raw lines so it behaves exactly like the file log,
/// malformed entries included.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
    log_lines: Arc<Mutex<Vec<String>>>,
    stats: Arc<Mutex<Option<CumulativeStats>>>,
    topics: Arc<Mutex<Vec<Topic>>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Backend(e.to_string())
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.questions.lock() {
            *guard = questions;
        }
        repo
    }

    /// Replace the stored topics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the lock is poisoned.
    pub fn set_topics(&self, topics: Vec<Topic>) -> Result<(), StorageError> {
        *self.topics.lock().map_err(poisoned)? = topics;
        Ok(())
    }

    /// Push a raw line onto the result log, bypassing serialization.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the lock is poisoned.
    pub fn push_raw_log_line(&self, line: impl Into<String>) -> Result<(), StorageError> {
        self.log_lines.lock().map_err(poisoned)?.push(line.into());
        Ok(())
    }

    /// Number of lines in the result log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the lock is poisoned.
    pub fn log_len(&self) -> Result<usize, StorageError> {
        Ok(self.log_lines.lock().map_err(poisoned)?.len())
    }
}

impl QuestionRepository for InMemoryRepository {
    fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.questions.lock().map_err(poisoned)?.clone())
    }

    fn append_question(&self, question: ValidatedQuestion) -> Result<Question, StorageError> {
        let mut guard = self.questions.lock().map_err(poisoned)?;
        let question = question.assign_id(next_question_id(guard.iter()));
        guard.push(question.clone());
        Ok(question)
    }
}

impl ResultLogRepository for InMemoryRepository {
    fn append_outcome(&self, outcome: &SessionOutcome) -> Result<(), StorageError> {
        let line = log_format::encode_outcome(outcome)?;
        self.log_lines.lock().map_err(poisoned)?.push(line);
        Ok(())
    }

    fn latest_outcome(&self) -> Result<Option<SessionOutcome>, StorageError> {
        let guard = self.log_lines.lock().map_err(poisoned)?;
        Ok(log_format::latest_outcome(guard.iter().map(String::as_str)))
    }
}

impl StatsRepository for InMemoryRepository {
    fn load_stats(&self) -> Result<CumulativeStats, StorageError> {
        Ok(self.stats.lock().map_err(poisoned)?.clone().unwrap_or_default())
    }

    fn save_stats(&self, stats: &CumulativeStats) -> Result<(), StorageError> {
        *self.stats.lock().map_err(poisoned)? = Some(stats.clone());
        Ok(())
    }
}

impl TopicRepository for InMemoryRepository {
    fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        Ok(self.topics.lock().map_err(poisoned)?.clone())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub results: Arc<dyn ResultLogRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub topics: Arc<dyn TopicRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repo(InMemoryRepository::new())
    }

    /// Wire every repository handle to the same backend value.
    #[must_use]
    pub fn from_repo<R>(repo: R) -> Self
    where
        R: QuestionRepository
            + ResultLogRepository
            + StatsRepository
            + TopicRepository
            + Clone
            + 'static,
    {
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let results: Arc<dyn ResultLogRepository> = Arc::new(repo.clone());
        let stats: Arc<dyn StatsRepository> = Arc::new(repo.clone());
        let topics: Arc<dyn TopicRepository> = Arc::new(repo);
        Self {
            questions,
            results,
            stats,
            topics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use quiz_core::time::fixed_now;
    use std::collections::BTreeSet;

    fn draft(text: &str) -> ValidatedQuestion {
        QuestionDraft {
            text: text.into(),
            choices: vec!["a".into(), "b".into()],
            correct_index: 0,
            category: "General".into(),
        }
        .validate()
        .unwrap()
    }

    fn outcome(wrong: &[u64]) -> SessionOutcome {
        SessionOutcome {
            timestamp: fixed_now(),
            score: 0.0,
            total: 3,
            wrong_ids: wrong.iter().copied().map(QuestionId::new).collect(),
            skipped_ids: BTreeSet::new(),
            categories: BTreeSet::new(),
            elapsed_secs: 0,
        }
    }

    #[test]
    fn append_question_assigns_monotonic_ids() {
        let repo = InMemoryRepository::new();
        let first = repo.append_question(draft("one")).unwrap();
        let second = repo.append_question(draft("two")).unwrap();

        assert_eq!(first.id(), QuestionId::new(1));
        assert_eq!(second.id(), QuestionId::new(2));
        assert_eq!(repo.list_questions().unwrap().len(), 2);
    }

    #[test]
    fn latest_outcome_reads_last_entry_only() {
        let repo = InMemoryRepository::new();
        assert!(repo.latest_outcome().unwrap().is_none());

        repo.append_outcome(&outcome(&[1])).unwrap();
        repo.append_outcome(&outcome(&[2])).unwrap();

        let latest = repo.latest_outcome().unwrap().unwrap();
        assert_eq!(latest.wrong_ids, [QuestionId::new(2)].into_iter().collect());
    }

    #[test]
    fn malformed_last_line_reads_as_absent() {
        let repo = InMemoryRepository::new();
        repo.append_outcome(&outcome(&[1])).unwrap();
        repo.push_raw_log_line("{not json").unwrap();

        assert!(repo.latest_outcome().unwrap().is_none());
        assert_eq!(repo.log_len().unwrap(), 2);
    }

    #[test]
    fn stats_default_until_saved() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.load_stats().unwrap(), CumulativeStats::default());

        let stats = CumulativeStats {
            sessions_completed: 4,
            ..CumulativeStats::default()
        };
        repo.save_stats(&stats).unwrap();
        assert_eq!(repo.load_stats().unwrap().sessions_completed, 4);
    }

    #[test]
    fn record_rejects_invalid_question() {
        let record = QuestionRecord {
            id: QuestionId::new(8),
            text: "Q".into(),
            choices: vec!["a".into()],
            correct_index: 3,
            category: "A".into(),
        };
        let err = record.into_question().unwrap_err();
        assert!(matches!(err, StorageError::InvalidQuestion { id, .. } if id == QuestionId::new(8)));
    }

    #[test]
    fn every_error_variant_renders_a_message() {
        let errors = [
            StorageError::Io("disk".into()),
            StorageError::Backend("lock".into()),
            StorageError::Serialization("json".into()),
            StorageError::InvalidQuestion {
                id: QuestionId::new(3),
                source: QuestionError::EmptyText,
            },
        ];
        for err in &errors {
            // Exhaustive, so every variant must also appear in `errors`.
            let expected = match err {
                StorageError::Io(_) => "io error: disk",
                StorageError::Backend(_) => "backend error: lock",
                StorageError::Serialization(_) => "serialization error: json",
                StorageError::InvalidQuestion { .. } => {
                    "invalid question 3: question text cannot be empty"
                }
            };
            assert_eq!(err.to_string(), expected);
        }
    }
}
