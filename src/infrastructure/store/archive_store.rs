//! Archive store with single retrieval and TTL eviction

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Archive not found: {0}")]
    NotFound(String),

    #[error("Archive expired: {0}")]
    Expired(String),
}

/// A stored archive
#[derive(Debug, Clone)]
pub struct StoredArchive {
    /// Name offered to the client when downloading, e.g. `calculator-server.zip`
    pub download_name: String,
    pub bytes: Vec<u8>,
    pub created_at: Instant,
}

/// Holds generated archives until they are downloaded once or expire
///
/// Each server run owns its own store; nothing is shared between processes.
pub struct ArchiveStore {
    entries: Mutex<HashMap<String, StoredArchive>>,
    ttl: Duration,
}

impl ArchiveStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store an archive and return the key used to download it
    ///
    /// Keys are unique per insert, so generating the same server twice never
    /// overwrites an archive that has not been downloaded yet.
    pub async fn insert(&self, name: &str, bytes: Vec<u8>) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let key = format!("{name}-{}.zip", &id[..8]);

        let archive = StoredArchive {
            download_name: format!("{name}.zip"),
            bytes,
            created_at: Instant::now(),
        };

        let mut entries = self.entries.lock().await;
        entries.insert(key.clone(), archive);
        debug!(key = %key, stored = entries.len(), "Stored archive");
        key
    }

    /// Remove and return an archive; a second call for the same key fails
    pub async fn take(&self, key: &str) -> Result<StoredArchive, StoreError> {
        self.take_at(key, Instant::now()).await
    }

    async fn take_at(&self, key: &str, now: Instant) -> Result<StoredArchive, StoreError> {
        let archive = self
            .entries
            .lock()
            .await
            .remove(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        if now.saturating_duration_since(archive.created_at) >= self.ttl {
            return Err(StoreError::Expired(key.to_string()));
        }
        Ok(archive)
    }

    /// Drop every archive older than the TTL, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now()).await
    }

    async fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, archive| now.saturating_duration_since(archive.created_at) < self.ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Periodically purge expired archives until the store is dropped
    pub fn spawn_janitor(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        info!(interval_secs = every.as_secs(), "Starting archive janitor");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let purged = store.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "Purged expired archives");
                }
            }
        })
    }
}
