//! Local JSON blob persistence
//!
//! The widgets that never talk to the backend (plain todo list, local
//! bookmarks, dates, books) round-trip their state through a key-value
//! store of JSON blobs, the way a browser app would use local storage.
//! One file holds the whole vault; every write rewrites it atomically
//! (temp file + rename).

#![warn(unreachable_pub)]

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Vault errors
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Underlying file I/O failed
    #[error("vault io error: {0}")]
    Io(#[from] std::io::Error),

    /// The vault file exists but does not parse as a JSON object
    #[error("vault file is corrupt: {0}")]
    Corrupt(String),

    /// A stored blob does not decode as the requested type
    #[error("blob {key} does not match the requested type: {source}")]
    BadBlob {
        /// Key of the offending blob
        key: String,
        /// Decode failure
        source: serde_json::Error,
    },

    /// Encoding a value to JSON failed
    #[error("failed to encode blob: {0}")]
    Encode(serde_json::Error),
}

/// File-backed key-value store of JSON blobs
#[derive(Debug)]
pub struct Vault {
    path: PathBuf,
    blobs: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl Vault {
    /// Open the vault at `path`, loading existing blobs
    ///
    /// A missing file is an empty vault; a file that is not a JSON object
    /// is reported as corrupt rather than silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let path = path.into();
        let blobs = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
                Ok(other) => {
                    return Err(VaultError::Corrupt(format!(
                        "expected a JSON object, found {other}"
                    )))
                }
                Err(e) => return Err(VaultError::Corrupt(e.to_string())),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(VaultError::Io(e)),
        };
        Ok(Self {
            path,
            blobs: Mutex::new(blobs),
        })
    }

    /// Read and decode the blob under `key`
    pub fn get_blob<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, VaultError> {
        let blobs = self.blobs.lock();
        match blobs.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| VaultError::BadBlob {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Encode and store a blob under `key`, persisting the whole vault
    pub fn put_blob<T: Serialize>(&self, key: &str, value: &T) -> Result<(), VaultError> {
        let encoded = serde_json::to_value(value).map_err(VaultError::Encode)?;
        let mut blobs = self.blobs.lock();
        blobs.insert(key.to_string(), encoded);
        self.persist(&blobs)
    }

    /// Remove the blob under `key`; removing a missing key is a no-op
    pub fn remove_blob(&self, key: &str) -> Result<(), VaultError> {
        let mut blobs = self.blobs.lock();
        if blobs.remove(key).is_some() {
            self.persist(&blobs)?;
        }
        Ok(())
    }

    /// Keys currently stored
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.blobs.lock().keys().cloned().collect()
    }

    fn persist(&self, blobs: &BTreeMap<String, serde_json::Value>) -> Result<(), VaultError> {
        let map: serde_json::Map<String, serde_json::Value> =
            blobs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let encoded = serde_json::to_vec_pretty(&serde_json::Value::Object(map))
            .map_err(VaultError::Encode)?;

        let tmp = self.path.with_extension("tmp");
        write_all(&tmp, &encoded)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::trace!(path = %self.path.display(), "vault persisted");
        Ok(())
    }
}

fn write_all(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
