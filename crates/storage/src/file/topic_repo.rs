use quiz_core::model::Topic;

use super::{FileRepository, read_optional};
use crate::repository::{StorageError, TopicRepository};

impl TopicRepository for FileRepository {
    fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        let path = &self.paths().topics;
        match read_optional(path)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display()))),
            _ => Ok(Vec::new()),
        }
    }
}
