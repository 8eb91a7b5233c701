use quiz_core::model::CumulativeStats;
use tracing::warn;

use super::{FileRepository, read_optional_lenient, write_whole};
use crate::repository::{StatsRepository, StorageError};

impl StatsRepository for FileRepository {
    fn load_stats(&self) -> Result<CumulativeStats, StorageError> {
        let path = &self.paths().stats;
        let Some(raw) = read_optional_lenient(path)? else {
            return Ok(CumulativeStats::default());
        };
        match serde_json::from_str(&raw) {
            Ok(stats) => Ok(stats),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "statistics file is malformed; starting from zero");
                Ok(CumulativeStats::default())
            }
        }
    }

    fn save_stats(&self, stats: &CumulativeStats) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(stats)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        write_whole(&self.paths().stats, &raw)
    }
}
