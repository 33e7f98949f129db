//! Persistent string key/value store.

use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

/// A JSON file of string keys and values, written through on every change.
///
/// Clones share the same entries. Failures to persist are logged and
/// otherwise ignored so a read-only data directory never takes the UI down.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    inner: Arc<Mutex<Inner>>,
}

impl LocalStorage {
    /// Open the store at `path`, starting empty if it is missing or corrupt.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read preferences");
                BTreeMap::new()
            }
        };

        Self {
            inner: Arc::new(Mutex::new(Inner {
                path: Some(path),
                entries,
            })),
        }
    }

    /// Open `preferences.json` in the application data directory.
    pub fn open_default() -> Self {
        match crate::config::data_dir() {
            Ok(dir) => Self::open(dir.join("preferences.json")),
            Err(e) => {
                tracing::warn!(error = %e, "No data directory, preferences will not persist");
                Self::in_memory()
            }
        }
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) {
        let mut inner = self.lock();
        inner.entries.insert(key.to_string(), value.into());
        inner.flush();
    }

    pub fn remove_item(&self, key: &str) {
        let mut inner = self.lock();
        if inner.entries.remove(key).is_some() {
            inner.flush();
        }
    }
}

impl Inner {
    fn flush(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = self.write_to(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write preferences");
        }
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
