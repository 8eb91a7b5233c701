mod answer;
mod ids;
mod question;
mod scoring;
mod session;
mod settings;
mod stats;
mod topic;

pub use ids::{ParseIdError, QuestionId};

pub use answer::{AnswerClass, AnswerState};
pub use question::{Question, QuestionDraft, QuestionError, ValidatedQuestion, next_question_id};
pub use scoring::{CORRECT_POINTS, Score, Tally, WRONG_PENALTY};
pub use session::{SessionOutcome, SessionReport, SessionReportError};
pub use settings::{QuizSettings, SettingsError};
pub use stats::{CategoryTally, CumulativeStats};
pub use topic::Topic;
