use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use quiz_core::model::{
    CumulativeStats, Question, QuestionId, QuizSettings, SessionOutcome, SessionReport,
};
use storage::repository::{QuestionRepository, ResultLogRepository, Storage};
use tracing::{debug, info};

use super::plan::{PoolSelector, distinct_categories, uniform_sample};
use super::service::{SessionMode, SessionService};
use crate::Clock;
use crate::error::SessionError;
use crate::stats_service::StatsService;

/// Everything produced by finishing a session.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSession {
    pub report: SessionReport,
    pub outcome: SessionOutcome,
    pub stats: CumulativeStats,
}

/// Orchestrates session start, finish and persistence.
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    selector: PoolSelector,
    questions: Arc<dyn QuestionRepository>,
    results: Arc<dyn ResultLogRepository>,
    stats: StatsService,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: QuizSettings,
        questions: Arc<dyn QuestionRepository>,
        results: Arc<dyn ResultLogRepository>,
        stats: StatsService,
    ) -> Self {
        Self {
            clock,
            selector: PoolSelector::new(settings),
            questions,
            results,
            stats,
        }
    }

    /// Wire the workflow to every repository of a `Storage`.
    #[must_use]
    pub fn from_storage(clock: Clock, settings: QuizSettings, storage: &Storage) -> Self {
        Self::new(
            clock,
            settings,
            Arc::clone(&storage.questions),
            Arc::clone(&storage.results),
            StatsService::new(Arc::clone(&storage.stats)),
        )
    }

    /// Sorted distinct categories of the bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the bank cannot be read.
    pub fn categories(&self) -> Result<Vec<String>, SessionError> {
        Ok(distinct_categories(&self.questions.list_questions()?))
    }

    /// Valid question counts for a full quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty bank.
    pub fn count_bounds_full(&self) -> Result<RangeInclusive<usize>, SessionError> {
        let pool = self.questions.list_questions()?;
        self.selector
            .count_bounds(pool.len())
            .ok_or(SessionError::Empty)
    }

    /// Valid question counts for a quiz over one category: `1..=category size`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyCategory` when the category has no questions.
    pub fn count_bounds_category(&self, category: &str) -> Result<RangeInclusive<usize>, SessionError> {
        let size = self.category_pool(category)?.len();
        Ok(1..=size)
    }

    /// Start a topic-balanced quiz over the whole bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty bank and
    /// `SessionError::InvalidCount` when `count` is outside `count_bounds_full`.
    pub fn start_full<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<SessionService, SessionError> {
        let pool = self.questions.list_questions()?;
        let bounds = self
            .selector
            .count_bounds(pool.len())
            .ok_or(SessionError::Empty)?;
        check_count(count, &bounds)?;

        let plan = self.selector.balanced(&pool, count, rng);
        SessionService::new(SessionMode::Full, plan.questions, self.clock.now())
    }

    /// Start a quiz sampled uniformly from one category.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyCategory` for an unknown category and
    /// `SessionError::InvalidCount` when `count` exceeds the category size.
    pub fn start_category<R: Rng + ?Sized>(
        &self,
        category: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<SessionService, SessionError> {
        let pool = self.category_pool(category)?;
        check_count(count, &(1..=pool.len()))?;

        let plan = uniform_sample(&pool, count, rng);
        SessionService::new(
            SessionMode::Category(category.to_owned()),
            plan.questions,
            self.clock.now(),
        )
    }

    /// Ids wrong or skipped in the most recent session; empty when there is nothing to recover.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the log exists but cannot be read.
    pub fn recovery_ids(&self) -> Result<BTreeSet<QuestionId>, SessionError> {
        Ok(self
            .results
            .latest_outcome()?
            .map(|outcome| outcome.recovery_ids())
            .unwrap_or_default())
    }

    /// Start a quiz over every bank question missed in the most recent session, shuffled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingToRecover` when the recovery set is empty and
    /// `SessionError::NoRecoveryMatches` when none of its ids are in the bank.
    pub fn start_recovery<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SessionService, SessionError> {
        let ids = self.recovery_ids()?;
        if ids.is_empty() {
            return Err(SessionError::NothingToRecover);
        }

        let mut seen = BTreeSet::new();
        let mut pool: Vec<Question> = self
            .questions
            .list_questions()?
            .into_iter()
            .filter(|q| ids.contains(&q.id()) && seen.insert(q.id()))
            .collect();
        if pool.is_empty() {
            return Err(SessionError::NoRecoveryMatches);
        }
        debug!(requested = ids.len(), matched = pool.len(), "recovery pool built");

        pool.shuffle(rng);
        SessionService::new(SessionMode::Recovery, pool, self.clock.now())
    }

    /// Finish a session, append its outcome to the result log and fold it into the statistics.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Report` if the report cannot be built and
    /// `SessionError::Storage` if persistence fails.
    pub fn finish(&self, session: SessionService) -> Result<CompletedSession, SessionError> {
        let report = session.finish()?;
        let outcome = SessionOutcome::from_report(&report, self.clock.now());
        self.results.append_outcome(&outcome)?;
        let stats = self.stats.record(&report)?;

        info!(
            score = %report.score(),
            wrong = report.wrong_ids().len(),
            skipped = report.skipped_ids().len(),
            elapsed_secs = outcome.elapsed_secs,
            "session completed"
        );

        Ok(CompletedSession {
            report,
            outcome,
            stats,
        })
    }

    fn category_pool(&self, category: &str) -> Result<Vec<Question>, SessionError> {
        let pool: Vec<Question> = self
            .questions
            .list_questions()?
            .into_iter()
            .filter(|q| q.category() == category)
            .collect();
        if pool.is_empty() {
            return Err(SessionError::EmptyCategory(category.to_owned()));
        }
        Ok(pool)
    }
}

fn check_count(count: usize, bounds: &RangeInclusive<usize>) -> Result<(), SessionError> {
    if bounds.contains(&count) {
        Ok(())
    } else {
        Err(SessionError::InvalidCount {
            requested: count,
            min: *bounds.start(),
            max: *bounds.end(),
        })
    }
}
