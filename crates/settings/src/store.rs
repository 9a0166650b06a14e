//! Persistence backends for the settings document.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("settings store rejected the write: {0}")]
    Rejected(String),
}

/// Opaque blob storage for the settings document.
///
/// The blob is any nested mapping; it may come from another schema version.
pub trait SettingsStore {
    /// The stored blob, or `None` if nothing has been saved yet.
    fn read(&self) -> Result<Option<Value>, StoreError>;

    fn write(&mut self, blob: &Value) -> Result<(), StoreError>;
}

/// Stores the document as pretty-printed JSON in one file.
///
/// A file that is not valid JSON is a read error rather than an empty store,
/// so a later write cannot replace it with defaults.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SettingsStore for JsonFileStore {
    fn read(&self) -> Result<Option<Value>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map(Some).map_err(|source| {
            tracing::error!(
                path = %self.path.display(),
                error = %source,
                "settings file is not valid JSON"
            );
            StoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn write(&mut self, blob: &Value) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(blob)?;
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), "settings written");
        Ok(())
    }
}

/// In-memory store. Can be told to reject writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Option<Value>,
    reject_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.data.clone())
    }

    fn write(&mut self, blob: &Value) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Rejected("memory store is read-only".to_string()));
        }
        self.data = Some(blob.clone());
        self.writes += 1;
        Ok(())
    }
}
