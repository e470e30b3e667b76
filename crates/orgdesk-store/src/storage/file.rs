//! File-backed storage.
//!
//! All keys live in one JSON object on disk. Every write rewrites the whole
//! file through a temp file and rename so a crash never leaves a torn file.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::Storage;
use crate::error::{PersistenceError, Result};

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage file at `path`. A missing file is an empty store,
    /// and so is one that cannot be read back as a map of strings; the first
    /// write then replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "storage file unreadable, starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "storage file is not UTF-8, starting empty"
                );
                BTreeMap::new()
            }
            Err(e) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path,
                    source: e,
                });
            }
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened storage");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| PersistenceError::Serialization { source: e })?;
        write_atomic(&self.path, &bytes)
    }

    /// Apply `change`, persist, and roll the in-memory map back if the
    /// write fails.
    fn commit(&mut self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let previous = self.entries.clone();
        change(&mut self.entries);
        if let Err(e) = self.flush() {
            self.entries = previous;
            return Err(e);
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        self.commit(|entries| {
            entries.remove(key);
        })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::trace!(path = %path.display(), bytes = bytes.len(), "storage flushed");
    Ok(())
}
