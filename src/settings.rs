//! Per-theme settings store holding the freshness marker.
//!
//! The host platform keeps theme settings in its own storage; the build only
//! needs `get`/`set` of integers by key, so that is all the trait exposes.
//! [`JsonSettingsStore`] persists values in a small JSON file:
//!
//! ```json
//! {
//!   "version": 1,
//!   "themes": {
//!     "bootscore-child": {
//!       "bootscore_scss_modified_timestamp": 5143200211
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Key of the stored freshness marker.
pub const MODIFIED_TIMESTAMP_KEY: &str = "bootscore_scss_modified_timestamp";

/// Current settings file format version.
const SETTINGS_VERSION: u32 = 1;

/// Error during settings operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// IO error
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Version mismatch
    #[error("Settings version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Key/value store for integer theme settings.
pub trait SettingsStore {
    /// Read a value, `None` if the key was never set.
    fn get_int(&self, key: &str) -> Result<Option<i64>, SettingsError>;

    /// Write a value.
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), SettingsError>;
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: HashMap<String, i64>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, SettingsError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsFile {
    version: u32,
    #[serde(default)]
    themes: BTreeMap<String, BTreeMap<String, i64>>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self { version: SETTINGS_VERSION, themes: BTreeMap::new() }
    }
}

/// Settings persisted in a JSON file, scoped to one theme.
///
/// Every `set_int` rewrites the file. Values of other themes in the same
/// file are preserved.
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    scope: String,
    file: SettingsFile,
}

impl JsonSettingsStore {
    /// Open the store at `path` for `scope`.
    ///
    /// A missing file behaves as an empty store.
    pub fn open(path: impl Into<PathBuf>, scope: impl Into<String>) -> Result<Self, SettingsError> {
        let path = path.into();
        let file = Self::load(&path)?.unwrap_or_default();
        Ok(Self { path, scope: scope.into(), file })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Theme scope values are read from and written to.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn load(path: &Path) -> Result<Option<SettingsFile>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: SettingsFile = serde_json::from_reader(BufReader::new(file))?;

        if settings.version != SETTINGS_VERSION {
            return Err(SettingsError::VersionMismatch {
                expected: SETTINGS_VERSION,
                found: settings.version,
            });
        }

        Ok(Some(settings))
    }

    fn save(&self) -> Result<(), SettingsError> {
        let io_err = |source: std::io::Error| SettingsError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = File::create(&self.path).map_err(io_err)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.file)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, SettingsError> {
        Ok(self.file.themes.get(&self.scope).and_then(|values| values.get(key)).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), SettingsError> {
        self.file.themes.entry(self.scope.clone()).or_default().insert(key.to_string(), value);
        self.save()
    }
}
