//! File-backed key-value storage
//!
//! Stores each key as a JSON file in a single directory:
//!
//! ```text
//! ~/.config/maintlog/storage/
//!   historyData.json
//!   deletedReports.json
//! ```
//!
//! Writes go through a temporary file in the same directory followed by a
//! rename, so a crash mid-write leaves the previous value intact.

use super::kv::KeyValueStore;
use crate::{MaintlogError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory-of-files key-value store
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding one file per key
    directory: PathBuf,

    /// Maximum size of one value in bytes
    quota_bytes: Option<u64>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `directory`
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;

        tracing::debug!(path = %directory.display(), "Opened file store");

        Ok(Self {
            directory,
            quota_bytes: None,
        })
    }

    /// Limit the size of a single stored value
    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Directory this store writes to
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file backing `key`
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(|c: char| c == '/' || c == '\\' || c.is_control())
        {
            return Err(MaintlogError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.directory.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        if let Some(limit) = self.quota_bytes {
            let needed = value.len() as u64;
            if needed > limit {
                return Err(MaintlogError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        fs::create_dir_all(&self.directory)?;
        let mut temp = NamedTempFile::new_in(&self.directory)?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)
            .map_err(|e| MaintlogError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::trace!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
