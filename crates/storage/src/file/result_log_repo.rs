use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};

use quiz_core::model::SessionOutcome;
use tracing::{debug, warn};

use super::{FileRepository, io_err, read_optional_lenient};
use crate::log_format;
use crate::repository::{ResultLogRepository, StorageError};

/// Whether the file is non-empty and its last byte is not a newline.
fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl ResultLogRepository for FileRepository {
    fn append_outcome(&self, outcome: &SessionOutcome) -> Result<(), StorageError> {
        let path = &self.paths().results;
        let encoded = log_format::encode_outcome(outcome)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| io_err(path, &e))?;

        // Appends always land at the end, whatever the read cursor.
        let mut line = String::with_capacity(encoded.len() + 2);
        if ends_mid_line(&mut file).map_err(|e| io_err(path, &e))? {
            warn!(path = %path.display(), "result log ends without a newline; starting a new line");
            line.push('\n');
        }
        line.push_str(&encoded);
        line.push('\n');

        file.write_all(line.as_bytes())
            .map_err(|e| io_err(path, &e))?;
        debug!(path = %path.display(), total = outcome.total, "outcome appended");
        Ok(())
    }

    fn latest_outcome(&self) -> Result<Option<SessionOutcome>, StorageError> {
        let Some(raw) = read_optional_lenient(&self.paths().results)? else {
            return Ok(None);
        };
        Ok(log_format::latest_outcome(raw.lines()))
    }
}
