use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::{BTreeSet, HashSet};
use std::ops::RangeInclusive;

use quiz_core::model::{Question, QuizSettings};
use tracing::debug;

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// Questions drawn one-per-category to seed topic coverage.
    pub category_picks: usize,
    /// Questions drawn uniformly from the rest of the pool.
    pub uniform_picks: usize,
}

impl SessionPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Sorted distinct categories of a pool.
#[must_use]
pub fn distinct_categories(pool: &[Question]) -> Vec<String> {
    pool.iter()
        .map(|q| q.category().to_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Drop later questions that repeat an earlier id.
fn unique_by_id(pool: &[Question]) -> Vec<&Question> {
    let mut seen = HashSet::new();
    pool.iter().filter(|q| seen.insert(q.id())).collect()
}

/// Uniform sampling without replacement; returns `min(n, pool)` questions in random order.
pub fn uniform_sample<R: Rng + ?Sized>(pool: &[Question], n: usize, rng: &mut R) -> SessionPlan {
    let candidates = unique_by_id(pool);
    let take = n.min(candidates.len());
    let questions: Vec<Question> = candidates
        .choose_multiple(rng, take)
        .map(|q| (*q).clone())
        .collect();
    SessionPlan {
        uniform_picks: questions.len(),
        questions,
        category_picks: 0,
    }
}

/// Builds the full-bank quiz with topic-balanced sampling.
#[derive(Debug, Clone)]
pub struct PoolSelector {
    settings: QuizSettings,
}

impl PoolSelector {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self { settings }
    }

    /// Valid answers to "how many questions?" for a pool of `pool_size`, or `None` for an empty pool.
    #[must_use]
    pub fn count_bounds(&self, pool_size: usize) -> Option<RangeInclusive<usize>> {
        let max = self.settings.max_questions().min(pool_size);
        (max >= 1).then_some(1..=max)
    }

    /// Number of categories that receive a guaranteed question for a quiz of `n`.
    #[must_use]
    pub fn balanced_category_count(&self, n: usize, distinct_categories: usize) -> usize {
        (n / 2)
            .min(distinct_categories)
            .min(self.settings.max_balanced_categories())
    }

    /// Topic-balanced selection.
    ///
    /// Picks `k` distinct categories uniformly and one question from each, fills
    /// the remaining `n - k` slots uniformly from the rest of the pool, then
    /// shuffles. Only one question is drawn per chosen category.
    pub fn balanced<R: Rng + ?Sized>(
        &self,
        pool: &[Question],
        n: usize,
        rng: &mut R,
    ) -> SessionPlan {
        let candidates = unique_by_id(pool);
        let n = n.min(candidates.len());
        let categories: Vec<&str> = candidates
            .iter()
            .map(|q| q.category())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let k = self.balanced_category_count(n, categories.len());

        let mut selected: Vec<Question> = Vec::with_capacity(n);
        let mut selected_ids = HashSet::new();
        for category in categories.choose_multiple(rng, k) {
            let members: Vec<&Question> = candidates
                .iter()
                .copied()
                .filter(|q| q.category() == *category)
                .collect();
            if let Some(question) = members.choose(rng) {
                selected_ids.insert(question.id());
                selected.push((*question).clone());
            }
        }
        let category_picks = selected.len();

        let rest: Vec<&Question> = candidates
            .iter()
            .copied()
            .filter(|q| !selected_ids.contains(&q.id()))
            .collect();
        let fill = n.saturating_sub(category_picks);
        selected.extend(rest.choose_multiple(rng, fill).map(|q| (*q).clone()));
        let uniform_picks = selected.len() - category_picks;

        selected.shuffle(rng);
        debug!(
            requested = n,
            category_picks, uniform_picks, "balanced selection built"
        );

        SessionPlan {
            questions: selected,
            category_picks,
            uniform_picks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn question(id: u64, category: &str) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            format!("Q{id}"),
            vec!["a".into(), "b".into()],
            0,
            category.into(),
        )
        .unwrap()
    }

    /// `categories` categories with `per` questions each, ids from 1.
    fn bank(categories: u64, per: u64) -> Vec<Question> {
        (0..categories)
            .flat_map(|c| (0..per).map(move |i| question(c * per + i + 1, &format!("C{c}"))))
            .collect()
    }

    fn assert_unique(plan: &SessionPlan) {
        let ids: HashSet<_> = plan.questions.iter().map(Question::id).collect();
        assert_eq!(ids.len(), plan.questions.len(), "duplicate ids in plan");
    }

    #[test]
    fn count_bounds_cap_at_settings_and_pool() {
        let selector = PoolSelector::new(QuizSettings::default());
        assert_eq!(selector.count_bounds(100), Some(1..=33));
        assert_eq!(selector.count_bounds(7), Some(1..=7));
        assert_eq!(selector.count_bounds(0), None);
    }

    #[test]
    fn balanced_from_twenty_categories_seeds_five() {
        let pool = bank(20, 3);
        let selector = PoolSelector::new(QuizSettings::default());
        assert_eq!(selector.balanced_category_count(10, 20), 5);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = selector.balanced(&pool, 10, &mut rng);

            assert_eq!(plan.total(), 10);
            assert_eq!(plan.category_picks, 5);
            assert_eq!(plan.uniform_picks, 5);
            assert_unique(&plan);

            let categories: HashSet<_> = plan.questions.iter().map(Question::category).collect();
            assert!(categories.len() >= 5);
        }
    }

    #[test]
    fn balanced_caps_categories_at_fifteen() {
        let selector = PoolSelector::new(QuizSettings::default());
        assert_eq!(selector.balanced_category_count(33, 40), 15);

        let pool = bank(40, 1);
        let mut rng = StdRng::seed_from_u64(7);
        let plan = selector.balanced(&pool, 33, &mut rng);
        assert_eq!(plan.category_picks, 15);
        assert_eq!(plan.total(), 33);
        assert_unique(&plan);
    }

    #[test]
    fn balanced_guarantees_one_question_per_category_when_it_can() {
        // n/2 = 3 categories out of 3, so each category must appear.
        let pool = bank(3, 10);
        let selector = PoolSelector::new(QuizSettings::default());
        let mut rng = StdRng::seed_from_u64(99);
        let plan = selector.balanced(&pool, 6, &mut rng);

        let mut per_category: HashMap<&str, usize> = HashMap::new();
        for q in &plan.questions {
            *per_category.entry(q.category()).or_default() += 1;
        }
        assert_eq!(per_category.len(), 3);
        assert_eq!(plan.total(), 6);
    }

    #[test]
    fn balanced_single_question_uses_no_category_picks() {
        let pool = bank(4, 2);
        let selector = PoolSelector::new(QuizSettings::default());
        let mut rng = StdRng::seed_from_u64(1);
        let plan = selector.balanced(&pool, 1, &mut rng);
        assert_eq!(plan.category_picks, 0);
        assert_eq!(plan.total(), 1);
    }

    #[test]
    fn balanced_never_exceeds_pool() {
        let pool = bank(2, 2);
        let selector = PoolSelector::new(QuizSettings::default());
        let mut rng = StdRng::seed_from_u64(3);
        let plan = selector.balanced(&pool, 10, &mut rng);
        assert_eq!(plan.total(), 4);
        assert_unique(&plan);
    }

    #[test]
    fn duplicate_ids_in_pool_are_selected_once() {
        let pool = vec![question(1, "A"), question(1, "A"), question(2, "B")];
        let mut rng = StdRng::seed_from_u64(5);
        let plan = uniform_sample(&pool, 3, &mut rng);
        assert_eq!(plan.total(), 2);
        assert_unique(&plan);

        let plan = PoolSelector::new(QuizSettings::default()).balanced(&pool, 3, &mut rng);
        assert_eq!(plan.total(), 2);
        assert_unique(&plan);
    }

    #[test]
    fn uniform_sample_respects_count() {
        let pool = bank(1, 8);
        let mut rng = StdRng::seed_from_u64(11);
        let plan = uniform_sample(&pool, 5, &mut rng);
        assert_eq!(plan.total(), 5);
        assert_eq!(plan.uniform_picks, 5);
        assert_unique(&plan);
        assert!(uniform_sample(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn distinct_categories_are_sorted() {
        let pool = vec![question(1, "b"), question(2, "a"), question(3, "b")];
        assert_eq!(distinct_categories(&pool), vec!["a".to_string(), "b".to_string()]);
    }
}
