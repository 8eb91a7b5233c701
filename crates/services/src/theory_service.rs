use std::collections::BTreeSet;
use std::sync::Arc;

use quiz_core::model::Topic;
use storage::repository::{StorageError, TopicRepository};

/// Read-only access to the theory notes.
#[derive(Clone)]
pub struct TheoryService {
    topics: Arc<dyn TopicRepository>,
}

impl TheoryService {
    #[must_use]
    pub fn new(topics: Arc<dyn TopicRepository>) -> Self {
        Self { topics }
    }

    /// Sorted distinct categories that have at least one topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the topics cannot be read.
    pub fn categories(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .topics
            .list_topics()?
            .into_iter()
            .map(|t| t.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }

    /// Topics of one category in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the topics cannot be read.
    pub fn topics_in(&self, category: &str) -> Result<Vec<Topic>, StorageError> {
        Ok(self
            .topics
            .list_topics()?
            .into_iter()
            .filter(|t| t.category == category)
            .collect())
    }
}
