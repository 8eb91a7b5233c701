use serde::{Deserialize, Serialize};

/// A theory note shown by the study viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    pub content: String,
    pub category: String,
}
