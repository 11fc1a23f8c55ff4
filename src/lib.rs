//! daybook: a local-first personal diary.
//!
//! daybook provides:
//! - Durable diary storage in a local key-value area, one JSON entry per profile
//! - Title search, emotion filtering and 12-per-page pagination
//! - Write, edit, retrospect and delete forms with field validation
//! - A login-gated delete flow and explicit dialog/navigation capabilities

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI host (main.rs)                                 │  ← Entry point
//! │  - console modal / navigator                        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Form state machines                              │  ← Mutations
//! │  - List derivation                                  │  ← Pure views
//! │  - Auth / modal / navigation capabilities           │
//! └─────────────────────────────────────────────────────┘
//!         │                                        │
//! ┌───────────────┐                        ┌───────────────┐
//! │ Storage Layer │                        │ UI Layer      │
//! │ (storage/)    │                        │ (ui/)         │
//! │ - Store trait │                        │ - View models │
//! │ - JSON entry  │                        │ - Rendering   │
//! │ - Areas       │                        │               │
//! └───────────────┘                        └───────────────┘
//!         │                                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure & Observability             │
//! │  - DiaryRecord, Emotion, errors (domain/)           │
//! │  - Data directory (infrastructure/)                 │
//! │  - Rotating file logs (observability/)              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: forms, list derivation and capabilities
//! - [`domain`]: diary types and errors
//! - [`infrastructure`]: data directory resolution
//! - [`storage`]: storage areas and the JSON diary store
//! - [`ui`]: view models and text rendering
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! Configuration comes from `<data_dir>/config.toml`, every key optional:
//!
//! ```toml
//! data_dir = "~/Documents/daybook"
//! storage_key = "diaries"
//! log_level = "debug"
//! log_file = "/tmp/daybook.log"
//! ```
//!
//! # Example
//!
//! ```rust
//! use daybook::app::{derive_view, ListQuery};
//! use daybook::storage::{DiaryStore, MemoryArea, Store};
//! use daybook::{Emotion, NewDiary};
//!
//! let mut store = DiaryStore::new(MemoryArea::default());
//! store.append(NewDiary::new("첫 번째 일기", "오늘은 맑음", Emotion::Happy))?;
//!
//! let view = derive_view(&store.load(), &ListQuery::default());
//! assert_eq!(view.total_count(), 1);
//! # Ok::<(), daybook::DaybookError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{
    derive_view, AuthCapability, DeleteFlow, EditForm, EmotionFilter, FormState, ListController,
    ListQuery, Modal, ModalCapability, Navigator, RetrospectForm, Route, SubmitOutcome, WriteForm,
};
pub use domain::{DaybookError, DiaryPatch, DiaryRecord, Emotion, NewDiary, Result};
pub use storage::{DiaryStore, FileArea, MemoryArea, StorageArea, Store};

use app::SessionAuth;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file name looked up inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding storage entries and logs.
    ///
    /// Default: see [`infrastructure::get_data_dir`].
    pub data_dir: PathBuf,

    /// Storage entry holding the diary list. Default: `"diaries"`.
    pub storage_key: String,

    /// Tracing filter directive, e.g. `info` or `daybook=debug`.
    pub log_level: Option<String>,

    /// Log file path. Default: `<data_dir>/daybook.log`.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::get_data_dir(),
            storage_key: storage::DEFAULT_STORAGE_KEY.to_string(),
            log_level: None,
            log_file: None,
        }
    }
}

/// On-disk shape of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<String>,
    storage_key: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

impl Config {
    /// Parses configuration from a string map with fallback defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: tilde-expanded path (blank values ignored)
    /// - `storage_key`: entry key (blank values ignored)
    /// - `log_level`, `log_file`: optional
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::Config`] if `storage_key` is not a valid entry
    /// key (see [`storage::area::is_valid_key`]).
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use daybook::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/tmp/diary".to_string());
    ///
    /// let config = Config::from_map(&map)?;
    /// assert_eq!(config.data_dir, std::path::PathBuf::from("/tmp/diary"));
    /// assert_eq!(config.storage_key, "diaries");
    /// # Ok::<(), daybook::DaybookError>(())
    /// ```
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self::default().merged(ConfigFile {
            data_dir: get("data_dir"),
            storage_key: get("storage_key"),
            log_level: get("log_level"),
            log_file: get("log_file"),
        })
    }

    /// Reads a TOML config file on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML with the
    /// known keys, or names an invalid `storage_key`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::default().merged_file(path.as_ref())
    }

    /// Parses TOML config text on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, has unknown keys, or
    /// names an invalid `storage_key`.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(raw).map_err(|e| DaybookError::Config(e.to_string()))?;
        Self::default().merged(file)
    }

    /// Loads `config.toml` from the default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(infrastructure::get_data_dir())
    }

    /// Loads `<dir>/config.toml` if it exists, with `dir` as the data
    /// directory unless the file sets `data_dir` itself.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file is invalid.
    pub fn load_from(dir: impl Into<PathBuf>) -> Result<Self> {
        let base = Self {
            data_dir: dir.into(),
            ..Self::default()
        };
        let path = base.data_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            base.merged_file(&path)
        } else {
            Ok(base)
        }
    }

    fn merged_file(self, path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "reading config file");
        let raw = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&raw)
            .map_err(|e| DaybookError::Config(format!("{}: {e}", path.display())))?;
        self.merged(file)
    }

    fn merged(mut self, file: ConfigFile) -> Result<Self> {
        if let Some(dir) = file.data_dir.filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(infrastructure::expand_tilde(&dir));
        }
        if let Some(key) = file.storage_key.filter(|k| !k.trim().is_empty()) {
            if !storage::area::is_valid_key(&key) {
                return Err(DaybookError::Config(format!(
                    "storage_key {key:?} may only contain ASCII letters, digits, '-' and '_'"
                )));
            }
            self.storage_key = key;
        }
        if file.log_level.is_some() {
            self.log_level = file.log_level;
        }
        if let Some(log_file) = file.log_file {
            self.log_file = Some(PathBuf::from(infrastructure::expand_tilde(&log_file)));
        }
        Ok(self)
    }
}

/// Opens the file-backed diary store described by `config`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_store(config: &Config) -> Result<DiaryStore<FileArea>> {
    tracing::debug!(data_dir = ?config.data_dir, key = %config.storage_key, "opening diary store");
    let area = FileArea::open(&config.data_dir)?;
    Ok(DiaryStore::with_key(area, config.storage_key.clone()))
}

/// Opens the login session stored next to the diaries.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_session(config: &Config) -> Result<SessionAuth<FileArea>> {
    Ok(SessionAuth::new(FileArea::open(&config.data_dir)?))
}
