use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing::info;

use super::{StorePaths, io_err, write_whole};
use crate::repository::StorageError;

/// Create whichever data files are missing. Existing files are left untouched.
pub(super) fn ensure_files(paths: &StorePaths) -> Result<(), StorageError> {
    ensure_json_array(&paths.questions)?;
    ensure_json_array(&paths.topics)?;
    ensure_empty(&paths.results)?;
    Ok(())
}

fn ensure_json_array(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        return Ok(());
    }
    info!(path = %path.display(), "creating empty data file");
    write_whole(path, "[]\n")
}

fn ensure_empty(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, &e))?;
    }
    info!(path = %path.display(), "creating empty result log");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_err(path, &e))?;
    Ok(())
}
