//! Persistence Module
//!
//! Best-effort backup of the cursor index to a single text file.
//!
//! The file holds the index as plain decimal digits. Reading never fails:
//! a missing, empty, unreadable or malformed file means "start at 0".

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::PersistenceError;

/// Largest index accepted from a backup file. Resuming replays the sequence
/// up to the recovered index, so anything above this is treated as corrupt.
pub const MAX_RECOVERABLE_INDEX: u64 = 100_000;

// == Backup File ==
/// Durable location of the last checkpointed cursor index.
#[derive(Debug, Clone)]
pub struct BackupFile {
    path: PathBuf,
}

impl BackupFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Recover Index ==
    /// Returns the stored index, or 0 when there is no usable prior state.
    pub fn recover_index(&self) -> u64 {
        match self.read_index() {
            Ok(Some(index)) => {
                info!(path = %self.path.display(), index, "Backup file read, resuming cursor");
                index
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No backup file found, starting at index 0");
                0
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Backup file unusable, starting at index 0");
                0
            }
        }
    }

    /// Reads and parses the file. `Ok(None)` means the file does not exist.
    pub fn read_index(&self) -> Result<Option<u64>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        parse_index(&text).map(Some)
    }

    // == Persist ==
    /// Overwrites the file with the decimal form of `index`.
    ///
    /// Each call writes its own uniquely named temp file next to the target,
    /// fsyncs it, then renames it over the target, so readers only ever see a
    /// complete value even when writes overlap. The temp file is removed if
    /// any step fails.
    pub fn persist(&self, index: u64) -> Result<(), PersistenceError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(parent)?;
        write!(file, "{}", index)?;
        file.as_file().sync_all()?;

        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

/// Parses backup content. Surrounding whitespace is tolerated.
fn parse_index(text: &str) -> Result<u64, PersistenceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PersistenceError::Corrupt(text.to_string()));
    }
    match trimmed.parse::<u64>() {
        Ok(index) if index <= MAX_RECOVERABLE_INDEX => Ok(index),
        _ => Err(PersistenceError::Corrupt(text.to_string())),
    }
}
