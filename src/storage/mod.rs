pub mod memory;
pub mod mongo;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value backend: JSON-serialized values addressed by opaque
/// string keys. No transactions and no compare-and-swap; callers that need a
/// read-modify-write to be atomic must serialize it themselves.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
}
