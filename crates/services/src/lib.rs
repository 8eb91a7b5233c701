#![forbid(unsafe_code)]

pub mod error;
pub mod question_service;
pub mod sessions;
pub mod stats_service;
pub mod theory_service;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{InputError, QuestionServiceError, SessionError};
pub use question_service::QuestionService;
pub use stats_service::StatsService;
pub use theory_service::TheoryService;

pub use sessions::{
    Command, CompletedSession, SessionLoopService, SessionMode, SessionProgress, SessionService,
    Step,
};
