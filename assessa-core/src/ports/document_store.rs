// assessa-core/src/ports/document_store.rs

// What the core needs from the managed document database, and nothing more.
// The adapters (in-memory, JSON files, a hosted service...) live in infrastructure.

use async_trait::async_trait;
use serde_json::Value;

use crate::infrastructure::error::InfrastructureError;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when no document exists under `key`.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, InfrastructureError>;

    /// Replaces the whole document under `key`.
    async fn set(&self, collection: &str, key: &str, document: Value)
    -> Result<(), InfrastructureError>;

    /// Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, key: &str) -> Result<(), InfrastructureError>;

    /// Every document of the collection, ordered by key.
    async fn list(&self, collection: &str) -> Result<Vec<Value>, InfrastructureError>;
}
