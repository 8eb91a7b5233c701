//! CLI argument definitions for the quiz trainer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Debug, Parser)]
#[command(
    name = "quiz",
    version,
    about = "Multiple-choice quiz trainer with recovery quizzes and statistics",
    long_about = "Run topic-balanced quizzes over a local question bank.\n\n\
                  Wrong and skipped questions of the last session can be retried \
                  with `quiz recovery`; cumulative per-category statistics are kept \
                  next to the bank."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Data directory holding the bank, result log, statistics and topics
    /// (default: $QUIZ_DATA_DIR, then ./quiz-data).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Seed the question shuffler for a reproducible session.
    #[arg(long, value_name = "SEED", global = true)]
    pub seed: Option<u64>,

    /// Upper bound offered for a full quiz.
    #[arg(long = "max-questions", value_name = "N", global = true)]
    pub max_questions: Option<usize>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q to silence warnings).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive main menu (default).
    Menu,

    /// Topic-balanced quiz over the whole bank.
    Run {
        /// Number of questions; prompted for when omitted.
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Quiz over a single category.
    Category {
        /// Category name; chosen from a list when omitted.
        name: Option<String>,

        /// Number of questions; prompted for when omitted.
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Retry the wrong and skipped questions of the last session.
    Recovery,

    /// Add a question to the bank.
    Add,

    /// Browse theory notes by category.
    Theory,

    /// Print cumulative statistics.
    Stats,

    /// Create missing data files and exit.
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
