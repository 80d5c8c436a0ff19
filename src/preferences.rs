//! Key-value preference store injected into the schedule editor.
//!
//! The editor only remembers which mode the user last chose. Two stores
//! ship: an in-memory map for embedding and tests, and a JSON file under the
//! config dir whose entries expire after a session-length TTL.

use crate::config::Config;
use crate::error::CliError;
use crate::lock::{DirLock, atomic_write};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Entries older than this read as absent.
const SESSION_TTL_HOURS: i64 = 12;

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError>;
}

// ============================================================================
// In-memory
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for &mut P {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        (**self).set(key, value)
    }
}

// ============================================================================
// File-backed
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub value: String,
    pub saved_at: DateTime<Utc>,
}

impl PreferenceEntry {
    pub fn is_stale(&self) -> bool {
        Utc::now() - self.saved_at > Duration::hours(SESSION_TTL_HOURS)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default)]
    entries: HashMap<String, PreferenceEntry>,
}

/// Preferences persisted at `{config_dir}/cache/preferences.json`.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    file: PreferenceFile,
}

impl FilePreferences {
    pub fn load() -> Result<Self, CliError> {
        let path = Config::config_dir()?.join("cache").join("preferences.json");
        Self::load_from_path(&path)
    }

    /// Load from a specific path. A missing or unreadable file starts empty.
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        let file = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(CliError::PreferencesRead)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "discarding corrupt preferences file");
                PreferenceFile::default()
            })
        } else {
            PreferenceFile::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry(&self, key: &str) -> Option<&PreferenceEntry> {
        self.file.entries.get(key).filter(|entry| !entry.is_stale())
    }

    fn save(&mut self) -> Result<(), CliError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let _lock = DirLock::acquire(dir)?;

        // Another session may have written since we loaded; the newer entry wins.
        if let Ok(content) = std::fs::read_to_string(&self.path) {
            if let Ok(on_disk) = serde_json::from_str::<PreferenceFile>(&content) {
                for (key, entry) in on_disk.entries {
                    let ours_is_newer = self
                        .file
                        .entries
                        .get(&key)
                        .is_some_and(|ours| ours.saved_at >= entry.saved_at);
                    if !ours_is_newer {
                        self.file.entries.insert(key, entry);
                    }
                }
            }
        }
        self.file.entries.retain(|_, entry| !entry.is_stale());

        let content = serde_json::to_string_pretty(&self.file)?;
        atomic_write(&self.path, &content)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entry(key).map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        self.file.entries.insert(
            key.to_string(),
            PreferenceEntry {
                value: value.to_string(),
                saved_at: Utc::now(),
            },
        );
        self.save()
    }
}
