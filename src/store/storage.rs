//! Key/value durable storage.
//!
//! Keys are short ASCII names (`ramadan_tracker_pro_data`, ...). The file
//! backend maps each key to `<root>/<key>.json` and replaces files through a
//! temp file + rename so a crash mid-write never leaves a torn document.

use crate::error::{MunjizError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Named-key byte storage.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` when absent.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(MunjizError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MunjizError::Storage(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        write_atomic(&path, value)
            .map_err(|e| MunjizError::Storage(format!("cannot write {}: {e}", path.display())))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MunjizError::Storage(format!(
                "cannot remove {}: {e}",
                path.display()
            ))),
        }
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_name = format!(
        ".{}.tmp-{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("store"),
        std::process::id()
    );
    let tmp_path = path
        .parent()
        .map(|p| p.join(&tmp_name))
        .unwrap_or_else(|| PathBuf::from(&tmp_name));

    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)
}

/// Process-local storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `write` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    /// Seed `key` directly, bypassing the failure switch.
    pub fn insert(&self, key: &str, value: impl Into<Vec<u8>>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.into());
        }
    }

    fn lock_entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| MunjizError::Storage("memory storage lock poisoned".to_owned()))
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock_entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let failing = self.fail_writes.lock().map(|flag| *flag).unwrap_or(false);
        if failing {
            return Err(MunjizError::Storage(format!(
                "write to {key} rejected: storage unavailable"
            )));
        }
        self.lock_entries()?.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock_entries()?.remove(key);
        Ok(())
    }
}
