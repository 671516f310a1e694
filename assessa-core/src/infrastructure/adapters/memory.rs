// assessa-core/src/infrastructure/adapters/memory.rs

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::infrastructure::adapters::{check_collection, check_segment};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::document_store::DocumentStore;

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// Process-local document store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, InfrastructureError> {
        check_collection(collection)?;
        check_segment(key)?;
        let guard = self.collections.read().await;
        Ok(guard.get(collection).and_then(|docs| docs.get(key)).cloned())
    }

    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: Value,
    ) -> Result<(), InfrastructureError> {
        check_collection(collection)?;
        check_segment(key)?;
        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), InfrastructureError> {
        check_collection(collection)?;
        check_segment(key)?;
        let mut guard = self.collections.write().await;
        if let Some(docs) = guard.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, InfrastructureError> {
        check_collection(collection)?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}
