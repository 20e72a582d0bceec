//! Backend de store en memoria
//!
//! Colecciones sobre un `RwLock<HashMap>`; soporta llamadas concurrentes y
//! lineariza operaciones por documento igual que el backend real.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

type CollectionMap = HashMap<String, serde_json::Value>;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, CollectionMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put(
        &self,
        collection: &str,
        id: &str,
        doc: serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn all(&self, collection: &str) -> Result<Vec<serde_json::Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();
        store
            .put("users", "u1", json!({"name": "A"}))
            .await
            .unwrap();

        let doc = store.get("users", "u1").await.unwrap();
        assert_eq!(doc, Some(json!({"name": "A"})));

        store.delete("users", "u1").await.unwrap();
        assert_eq!(store.get("users", "u1").await.unwrap(), None);

        // el borrado es idempotente
        store.delete("users", "u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = MemoryStore::new();
        store.put("users", "x", json!(1)).await.unwrap();
        store.put("drivers", "x", json!(2)).await.unwrap();

        assert_eq!(store.all("users").await.unwrap().len(), 1);
        assert_eq!(store.get("drivers", "x").await.unwrap(), Some(json!(2)));
    }
}
