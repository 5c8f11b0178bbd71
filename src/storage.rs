//! Storage - the key-value durability boundary.
//!
//! Each store owns exactly one key and persists its whole snapshot as a
//! single JSON document under that key. Writes are last-write-wins with no
//! coordination across keys. Reads fail soft: a missing or unreadable key is
//! reported as absent, never as an error.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Key-value durability boundary for store snapshots.
///
/// Object-safe; payloads cross this boundary as JSON strings. Typed access
/// goes through [`StorageExt`].
pub trait Storage: Send + Sync {
    /// Read the raw document under a key. `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Write a document under a key, overwriting any prior value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed convenience layer over [`Storage`].
pub trait StorageExt: Storage {
    /// Load and deserialize the value under a key.
    ///
    /// Fails soft: absent keys and parse failures both yield `None`. Parse
    /// failures are logged so a corrupted document is diagnosable.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, %err, "discarding unparseable stored document");
                None
            }
        }
    }

    /// Serialize and write a value under a key.
    fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|source| Error::Serde {
            key: key.to_string(),
            source,
        })?;
        self.write(key, &raw)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// In-memory storage backed by a HashMap.
///
/// Clone-friendly via Arc; clones share the same underlying map. Used by
/// tests and by ephemeral sessions that do not want durability.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Error::Io {
            key: key.to_string(),
            source: std::io::Error::other("lock poisoned"),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Error::Io {
            key: key.to_string(),
            source: std::io::Error::other("lock poisoned"),
        })?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed storage: one `<key>.json` document per key under a directory.
///
/// The durable stand-in for browser local storage. The directory is created
/// on construction; documents under it remain drop-in compatible with the
/// persisted JSON shapes of the original storefront.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| Error::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory this storage writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.path_for(key), value).map_err(|source| Error::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
