//! # Key-Value Port
//!
//! The storage port the repositories are written against, plus its two
//! backends.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KeyValueStore (trait)                              │
//! │           get / set / remove / keys, one JSON string per key           │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │       MemoryStore        │        │        FileStore         │      │
//! │  │  Mutex<HashMap<..>>      │        │  <dir>/<key>.json        │      │
//! │  │  tests, ephemeral runs   │        │  temp file + rename      │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys double as file names, so every backend accepts only
//! `[A-Za-z0-9_-]`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Port
// =============================================================================

/// A string-keyed store of string values.
///
/// Injected into repositories; never a global.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value for `key`. Last write wins.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Lists every key currently present, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Checks a key against the portable charset.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory backend. State lives as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// =============================================================================
// File Backend
// =============================================================================

const EXTENSION: &str = "json";

/// Directory-backed store: one `<key>.json` file per key.
///
/// ## Write Path
/// ```text
/// set("cart", value)
///      │
///      ▼
/// write <dir>/cart.json.tmp
///      │
///      ▼
/// rename → <dir>/cart.json   (readers never see a half-written file)
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(path = %root.display(), "Opened file store");
        Ok(FileStore { root })
    }

    /// The directory holding the key files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));

        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(key = %key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
