use std::sync::Arc;

use quiz_core::model::{CumulativeStats, SessionReport};
use storage::repository::{StatsRepository, StorageError};
use tracing::debug;

/// Read-modify-write access to the cumulative statistics record.
#[derive(Clone)]
pub struct StatsService {
    stats: Arc<dyn StatsRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    /// Current statistics; zeroed when nothing has been recorded yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if existing data cannot be read.
    pub fn load(&self) -> Result<CumulativeStats, StorageError> {
        self.stats.load_stats()
    }

    /// Fold one finished session into the stored statistics and return the result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the statistics cannot be read or written.
    pub fn record(&self, report: &SessionReport) -> Result<CumulativeStats, StorageError> {
        let mut stats = self.stats.load_stats()?;
        stats.fold(report);
        self.stats.save_stats(&stats)?;
        debug!(
            sessions = stats.sessions_completed,
            categories = stats.per_category.len(),
            "statistics updated"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerState, Question, QuestionId};
    use std::time::Duration;
    use storage::InMemoryRepository;

    fn question(id: u64, category: &str) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            format!("Q{id}"),
            vec!["right".into(), "wrong".into()],
            0,
            category.into(),
        )
        .unwrap()
    }

    #[test]
    fn record_accumulates_across_sessions() {
        let service = StatsService::new(Arc::new(InMemoryRepository::new()));
        let report = SessionReport::from_answers(
            vec![question(1, "A"), question(2, "B")],
            &[AnswerState::Answered(0), AnswerState::Skipped],
            Duration::from_secs(3),
        )
        .unwrap();

        service.record(&report).unwrap();
        let stats = service.record(&report).unwrap();

        assert_eq!(stats.sessions_completed, 2);
        assert_eq!(stats.total_correct, 2);
        assert_eq!(stats.total_skipped, 2);
        assert_eq!(stats.category("A").unwrap().correct, 2);
        assert_eq!(stats.category("B").unwrap().answered(), 0);
        assert_eq!(service.load().unwrap(), stats);
    }
}
