use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{KeyValueStore, StoreError};

/// In-memory store.
///
/// Useful for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_overwrites_and_get_returns_latest() {
        let store = MemoryStore::new();
        assert_eq!(store.get("alice").await.unwrap(), None);

        store.put("alice", "{\"v\":1}".into()).await.unwrap();
        store.put("alice", "{\"v\":2}".into()).await.unwrap();

        assert_eq!(store.get("alice").await.unwrap().as_deref(), Some("{\"v\":2}"));
    }
}
