use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const ENTRIES_KEY: &str = "journal_entries";
pub const DRAFT_KEY: &str = "journal_draft";
pub const USER_KEY: &str = "journal_user";
pub const TOKEN_KEY: &str = "journal_token";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode slot {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value slots, one pretty-printed JSON file per key under `dir`.
#[derive(Debug, Clone)]
pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.dir).await
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Reads a slot. Missing slots are `None`; unreadable or corrupted slots
    /// are logged, cleared and also reported as `None`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.slot_path(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    error!(key = key, "failed to parse slot, clearing it: {err}");
                    if let Err(err) = self.remove(key).await {
                        warn!("{err}");
                    }
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!(key = key, "failed to read slot: {err}");
                None
            }
        }
    }

    pub async fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        fs::write(self.slot_path(key), payload)
            .await
            .map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })
    }

    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
