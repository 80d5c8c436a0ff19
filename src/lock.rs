//! Advisory lock and atomic writes for files under the cronplan config dir.
//!
//! Two editor sessions may save their mode preference at the same moment;
//! the lock serialises the read-modify-write and the atomic write keeps the
//! file whole if the process dies mid-save.

use crate::error::CliError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Exclusive lock held until dropped.
pub struct DirLock {
    _lock_file: File,
}

impl DirLock {
    /// Lock `dir` by creating (if needed) and locking `dir/cronplan.lock`.
    pub fn acquire(dir: &Path) -> Result<Self, CliError> {
        Self::acquire_at_path(&dir.join("cronplan.lock"))
    }

    pub fn acquire_at_path(lock_path: &Path) -> Result<Self, CliError> {
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent).map_err(CliError::PreferencesWrite)?;
        }

        // Don't truncate - the file only has to exist for locking
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(lock_path)
            .map_err(CliError::PreferencesWrite)?;

        lock_file.lock_exclusive().map_err(|_| CliError::LockFailed)?;

        Ok(Self {
            _lock_file: lock_file,
        })
    }
}

/// Write `content` to `path` through a temp file in the same directory and
/// a rename.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), CliError> {
    let dir = path.parent().ok_or_else(|| {
        CliError::PreferencesWrite(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        ))
    })?;
    std::fs::create_dir_all(dir).map_err(CliError::PreferencesWrite)?;

    let mut temp_file = NamedTempFile::new_in(dir).map_err(CliError::PreferencesWrite)?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(CliError::PreferencesWrite)?;
    temp_file.flush().map_err(CliError::PreferencesWrite)?;

    temp_file
        .persist(path)
        .map_err(|e| CliError::PreferencesWrite(e.error))?;

    Ok(())
}
