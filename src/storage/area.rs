//! Durable key-value storage areas.
//!
//! A [`StorageArea`] is the local analogue of a browser's storage area: string
//! values addressed by string keys, surviving restarts, scoped to one profile
//! directory. The diary list lives in one entry; the login token in another.

use crate::domain::error::{DaybookError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Whether `key` can name a storage entry: non-empty ASCII letters, digits,
/// `-` and `_`.
///
/// ```
/// use daybook::storage::area::is_valid_key;
///
/// assert!(is_valid_key("diaries"));
/// assert!(!is_valid_key("my.diaries"));
/// ```
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Local persistent key-value storage.
pub trait StorageArea {
    /// Reads the value stored under `key`, `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes the entry under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entry cannot be deleted.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage area.
///
/// Nothing survives the process; used for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryArea {
    items: HashMap<String, String>,
}

impl MemoryArea {
    /// Creates an area pre-seeded with one entry.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut items = HashMap::new();
        items.insert(key.into(), value.into());
        Self { items }
    }
}

impl StorageArea for MemoryArea {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// File-backed storage area: one file per key inside a data directory.
///
/// Writes go to `<key>.tmp` first and are renamed over the final file, so an
/// interrupted write never leaves a half-written entry behind.
#[derive(Debug, Clone)]
pub struct FileArea {
    dir: PathBuf,
}

impl FileArea {
    /// Opens (and creates if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tracing::debug!(dir = ?dir, "opening file storage area");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(DaybookError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(key))
    }
}

impl StorageArea for FileArea {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            tracing::trace!(key = %key, "entry absent");
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_area_round_trips_items() {
        let mut area = MemoryArea::default();
        assert_eq!(area.get_item("k").unwrap(), None);
        area.set_item("k", "v").unwrap();
        assert_eq!(area.get_item("k").unwrap().as_deref(), Some("v"));
        area.remove_item("k").unwrap();
        area.remove_item("k").unwrap();
        assert_eq!(area.get_item("k").unwrap(), None);
    }

    #[test]
    fn file_area_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut area = FileArea::open(dir.path().join("profile")).unwrap();
        area.set_item("diaries", "[]").unwrap();

        let reopened = FileArea::open(dir.path().join("profile")).unwrap();
        assert_eq!(reopened.get_item("diaries").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("profile").join("diaries.tmp").exists());
    }

    #[test]
    fn file_area_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut area = FileArea::open(dir.path()).unwrap();
        assert!(area.set_item("../escape", "x").is_err());
        assert!(area.get_item("").is_err());
    }

    #[test]
    fn file_area_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut area = FileArea::open(dir.path()).unwrap();
        assert!(area.remove_item("accessToken").is_ok());
    }
}
