//! Local key-value persistence.
//!
//! State lives in a handful of named JSON blobs (`prefs`, `sprint`,
//! `history`). The store itself only moves strings; the typed loaders in
//! [`state`] decode them and apply the fail-soft defaults.

mod prefs;
pub mod state;

pub use prefs::{Contrast, FontScale, Prefs};
pub use state::{
    load_history, load_history_or_default, load_prefs, load_prefs_or_default, load_sprint,
    load_sprint_or_default, save_history, save_prefs, save_sprint, update_pref, HISTORY_KEY,
    PREFS_KEY, SPRINT_KEY,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Returns the data directory.
///
/// `ALLYSHIP_DATA_DIR` wins when set. Otherwise `~/.config/allyship[-dev]/`,
/// with the `-dev` suffix when `ALLYSHIP_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("ALLYSHIP_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ALLYSHIP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("allyship-dev")
            } else {
                base_dir.join("allyship")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// A last-write-wins store of named string blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store in the default [`data_dir`].
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self::with_dir(data_dir()?))
    }

    /// Open a store rooted at `dir` (created on first write).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                message: format!("{}: {e}", path.display()),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |e: std::io::Error| StoreError::Write {
            key: key.to_string(),
            message: e.to_string(),
        };
        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write beside the target and rename so readers never see half a blob.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(write_err)?;
        std::fs::rename(&tmp, &path).map_err(write_err)?;
        tracing::debug!(key, path = %path.display(), "stored blob");
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Deserialize a field, substituting `T::default()` for any value that does
/// not decode. Used for stored fields whose bad values must not discard the
/// surrounding record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match T::deserialize(value) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::warn!("ignoring unreadable stored value: {e}");
            Ok(T::default())
        }
    }
}
