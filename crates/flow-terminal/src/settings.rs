// crates/flow-terminal/src/settings.rs

//! Small key-value settings store backed by a JSON file.
//!
//! Holds string values only, like browser local storage:
//! - `optionFilters`     : JSON-encoded `FilterSelection`
//! - `preferredTimezone` : `EST` / `PST` / `CST` / `MST` / `UTC`
//!
//! Every mutation rewrites the file through a temp file + rename.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use flow_core::{FilterSelection, Timezone};

pub const FILTERS_KEY: &str = "optionFilters";
pub const TIMEZONE_KEY: &str = "preferredTimezone";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("settings file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode setting: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct SettingsStore {
    /// `None` keeps everything in memory.
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl SettingsStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(raw) => serde_json::from_slice(&raw).map_err(|source| SettingsError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(SettingsError::Io { path, source }),
        };
        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// Store that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.into());
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), SettingsError> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Saved filter selection, if any. An unparseable value is treated
    /// as absent.
    pub fn load_filters(&self) -> Option<FilterSelection> {
        let raw = self.get(FILTERS_KEY)?;
        match serde_json::from_str(raw) {
            Ok(selection) => Some(selection),
            Err(e) => {
                warn!("Ignoring unreadable saved filters: {}", e);
                None
            }
        }
    }

    pub fn save_filters(&mut self, selection: &FilterSelection) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(selection)?;
        self.set(FILTERS_KEY, raw)
    }

    pub fn clear_filters(&mut self) -> Result<(), SettingsError> {
        self.remove(FILTERS_KEY)
    }

    pub fn load_timezone(&self) -> Option<Timezone> {
        self.get(TIMEZONE_KEY).and_then(Timezone::from_code)
    }

    pub fn save_timezone(&mut self, tz: Timezone) -> Result<(), SettingsError> {
        self.set(TIMEZONE_KEY, tz.code())
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut bytes = serde_json::to_vec_pretty(&self.values)?;
        bytes.push(b'\n');

        let tmp = temp_path(path);
        fs::write(&tmp, &bytes).map_err(|source| SettingsError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Settings written to {}", path.display());
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut os_string = path.as_os_str().to_os_string();
    os_string.push(".tmp");
    os_string.into()
}
