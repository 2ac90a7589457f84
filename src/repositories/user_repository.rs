use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;
use tracing::warn;

use crate::error::AppError;
use crate::models::user_record::UserRecord;
use crate::storage::KeyValueStore;

/// Loads and saves `UserRecord`s over the key-value store. One entry per
/// username, the username itself is the key.
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    storage_timeout: Duration,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, storage_timeout: Duration) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
            storage_timeout,
        }
    }

    /// Serializes read-modify-write sequences for one username. The store has
    /// no compare-and-swap, so every flow holds this guard from its first
    /// `load` to its final `save`; operations on different usernames run
    /// freely in parallel.
    // TODO: evict lock entries for long-idle usernames
    pub async fn lock_user(&self, username: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(username.to_owned())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    pub async fn load(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let raw = timeout(self.storage_timeout, self.store.get(username))
            .await
            .map_err(|_| AppError::Timeout)??;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| {
                warn!("undecodable record for user {}: {}", username, e);
                AppError::CorruptRecord(e)
            })
        })
        .transpose()
    }

    pub async fn load_or_new(&self, username: &str) -> Result<UserRecord, AppError> {
        Ok(self
            .load(username)
            .await?
            .unwrap_or_else(|| UserRecord::new(username)))
    }

    pub async fn save(&self, record: &UserRecord) -> Result<(), AppError> {
        let json = serde_json::to_string(record).map_err(AppError::CorruptRecord)?;

        timeout(self.storage_timeout, self.store.put(&record.username, json))
            .await
            .map_err(|_| AppError::Timeout)??;

        Ok(())
    }
}
