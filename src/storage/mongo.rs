use std::sync::Arc;

use mongodb::{bson::doc, Collection, Database};
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StoreError};

#[derive(Serialize, Deserialize)]
struct KvDocument {
    key: String,
    value: String,
}

/// MongoDB-backed store: one document per key in the `kv_entries` collection,
/// the record JSON kept as an opaque string value.
pub struct MongoStore {
    collection: Collection<KvDocument>,
}

impl MongoStore {
    pub fn new(db: Arc<Database>) -> Self {
        let collection = db.collection::<KvDocument>("kv_entries");
        Self { collection }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MongoStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let found = self
            .collection
            .find_one(doc! { "key": key })
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(found.map(|d| d.value))
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let document = KvDocument {
            key: key.to_owned(),
            value,
        };

        self.collection
            .replace_one(doc! { "key": key }, &document)
            .upsert(true)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}
