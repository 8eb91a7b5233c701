use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use quiz_core::model::QuizSettings;
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::StorePaths;

pub const DATA_DIR_ENV: &str = "QUIZ_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "quiz-data";

/// Resolved runtime configuration, passed explicitly into the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub settings: QuizSettings,
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Build the configuration from CLI values and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_questions` is zero.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        max_questions: Option<usize>,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        Self::resolve_with_env(data_dir, std::env::var_os(DATA_DIR_ENV), max_questions, seed)
    }

    /// Same as `resolve`, with the environment value passed in.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_questions` is zero.
    pub fn resolve_with_env(
        data_dir: Option<PathBuf>,
        env_data_dir: Option<OsString>,
        max_questions: Option<usize>,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        let data_dir = data_dir
            .or_else(|| env_data_dir.filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let settings = match max_questions {
            Some(max) => QuizSettings::new(max, QuizSettings::DEFAULT_MAX_BALANCED_CATEGORIES)
                .context("invalid --max-questions")?,
            None => QuizSettings::default(),
        };

        Ok(Self {
            data_dir,
            settings,
            seed,
        })
    }

    #[must_use]
    pub fn store_paths(&self) -> StorePaths {
        StorePaths::in_dir(&self.data_dir)
    }

    /// Seeded when `--seed` was given, otherwise from the thread RNG.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
