#![forbid(unsafe_code)]

pub mod file;
pub mod log_format;
pub mod repository;

pub use file::{FileRepository, StorePaths};
pub use repository::{
    InMemoryRepository, QuestionRecord, QuestionRepository, ResultLogRepository, StatsRepository,
    Storage, StorageError, TopicRepository,
};
