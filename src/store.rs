//! Local key-value persistence
//!
//! Favorites and the theme flag live in a small string-keyed store.
//! `FileStore` keeps every key in one JSON object on disk,
//! `MemoryStore` backs tests.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store file: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Refusing to overwrite unreadable store {0}")]
    Unreadable(PathBuf),
}

/// String-keyed persistent storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Boolean value, `false` when absent or unparseable
    fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .and_then(|v| v.trim().parse::<bool>().ok())
            .unwrap_or(false)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(key, value.to_string())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// JSON-object file store, rewritten on every `set`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
    /// False when a damaged file could not be moved out of the way
    writable: bool,
}

impl FileStore {
    /// Default store path (~/.local/share/tmdbsurfer/store.json)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("tmdbsurfer").join("store.json"))
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self, StoreError> {
        let path = Self::default_path().ok_or(StoreError::NoDataDir)?;
        Ok(Self::open(path))
    }

    /// Open a store file. A missing file starts empty. A file that cannot
    /// be read or parsed is moved to `<path>.bak` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let contents: Result<BTreeMap<String, String>, String> = match std::fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).map_err(|e| e.to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.to_string()),
        };

        let (values, writable) = match contents {
            Ok(values) => (values, true),
            Err(e) => {
                warn!("Ignoring unreadable store {}: {}", path.display(), e);
                (BTreeMap::new(), Self::set_aside(&path))
            }
        };
        debug!("Opened store {} ({} keys)", path.display(), values.len());
        Self {
            path,
            values,
            writable,
        }
    }

    /// Where a damaged store file is kept
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Move a damaged file aside so the next write cannot destroy it
    fn set_aside(path: &Path) -> bool {
        let backup = Self::backup_path(path);
        match std::fs::rename(path, &backup) {
            Ok(()) => {
                warn!("Moved damaged store to {}", backup.display());
                true
            }
            Err(e) => {
                warn!(
                    "Could not move {} aside ({}); changes will not be saved",
                    path.display(),
                    e
                );
                false
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if !self.writable {
            return Err(StoreError::Unreadable(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

// =============================================================================
// Memory Store
// =============================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
