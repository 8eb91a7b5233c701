use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::repository::{Storage, StorageError};

mod bootstrap;
mod question_repo;
mod result_log_repo;
mod stats_repo;
mod topic_repo;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const RESULTS_FILE: &str = "results.jsonl";
pub const STATS_FILE: &str = "stats.json";
pub const TOPICS_FILE: &str = "topics.json";

/// Locations of the four data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub questions: PathBuf,
    pub results: PathBuf,
    pub stats: PathBuf,
    pub topics: PathBuf,
}

impl StorePaths {
    /// Standard file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            questions: dir.join(QUESTIONS_FILE),
            results: dir.join(RESULTS_FILE),
            stats: dir.join(STATS_FILE),
            topics: dir.join(TOPICS_FILE),
        }
    }
}

/// JSON-file backend. Every call reads or rewrites whole files; only one
/// session runs at a time, so there is no locking.
#[derive(Debug, Clone)]
pub struct FileRepository {
    paths: StorePaths,
}

impl FileRepository {
    #[must_use]
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Create missing data files: an empty bank, an empty log, empty topics.
    ///
    /// The statistics file is created lazily on the first completed session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if a directory or file cannot be created.
    pub fn init(&self) -> Result<(), StorageError> {
        bootstrap::ensure_files(&self.paths)
    }
}

impl Storage {
    /// Build a `Storage` backed by JSON files, creating missing ones.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if bootstrapping the files fails.
    pub fn files(paths: StorePaths) -> Result<Self, StorageError> {
        let repo = FileRepository::new(paths);
        repo.init()?;
        info!(questions = %repo.paths().questions.display(), "file storage ready");
        Ok(Self::from_repo(repo))
    }
}

pub(crate) fn io_err(path: &Path, err: &io::Error) -> StorageError {
    StorageError::Io(format!("{}: {err}", path.display()))
}

/// Read a whole file; a missing file reads as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file missing");
            Ok(None)
        }
        Err(err) => Err(io_err(path, &err)),
    }
}

/// Like `read_optional`, but contents that are not UTF-8 read as `None`.
///
/// For files whose malformed data counts as absent (result log, statistics).
pub(crate) fn read_optional_lenient(path: &Path) -> Result<Option<String>, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file missing");
            return Ok(None);
        }
        Err(err) => return Err(io_err(path, &err)),
    };
    match String::from_utf8(bytes) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "data file is not valid UTF-8; treating it as empty");
            Ok(None)
        }
    }
}

/// Replace a whole file, writing to a sibling temp file first.
pub(crate) fn write_whole(path: &Path, contents: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, &e))?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(|e| io_err(&tmp, &e))?;
    fs::rename(&tmp, path).map_err(|e| io_err(path, &e))?;
    debug!(path = %path.display(), bytes = contents.len(), "data file written");
    Ok(())
}
