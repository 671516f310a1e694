// assessa-core/src/infrastructure/adapters/json_store.rs

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::infrastructure::adapters::{check_collection, check_segment};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::write_json_atomic;
use crate::ports::document_store::DocumentStore;

const DOCUMENT_EXTENSION: &str = "json";

/// Document store backed by a directory tree.
///
/// Layout: `<root>/<collection segments...>/<key>.json`, one pretty-printed JSON
/// document per file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, InfrastructureError> {
        let segments = check_collection(collection)?;
        Ok(segments
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment)))
    }

    fn document_path(&self, collection: &str, key: &str) -> Result<PathBuf, InfrastructureError> {
        check_segment(key)?;
        Ok(self
            .collection_dir(collection)?
            .join(format!("{key}.{DOCUMENT_EXTENSION}")))
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    #[instrument(skip(self))]
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, InfrastructureError> {
        let path = self.document_path(collection, key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InfrastructureError::Io(e)),
        }
    }

    #[instrument(skip(self, document))]
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: Value,
    ) -> Result<(), InfrastructureError> {
        let path = self.document_path(collection, key)?;
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_json_atomic(&target, &document))
            .await
            .map_err(join_error)??;
        debug!(path = ?path, "Document written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, key: &str) -> Result<(), InfrastructureError> {
        let path = self.document_path(collection, key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfrastructureError::Io(e)),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, collection: &str) -> Result<Vec<Value>, InfrastructureError> {
        let dir = self.collection_dir(collection)?;
        let paths = tokio::task::spawn_blocking(move || document_paths(&dir))
            .await
            .map_err(join_error)??;

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = tokio::fs::read_to_string(&path).await?;
            documents.push(serde_json::from_str(&content)?);
        }
        Ok(documents)
    }
}

/// Document files directly under `dir`, in file-name order. A missing directory is empty.
fn document_paths(dir: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| InfrastructureError::Io(e.into()))?;
        let is_document = entry.file_type().is_file()
            && entry.path().extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXTENSION);
        if is_document {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn join_error(err: tokio::task::JoinError) -> InfrastructureError {
    InfrastructureError::Io(std::io::Error::other(err))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_documents_are_files_under_collection() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path());

        store
            .set("assessmentCriteria", "F1", json!({ "frameworkId": "F1" }))
            .await?;

        assert!(dir.path().join("assessmentCriteria/F1.json").is_file());
        assert_eq!(
            store.get("assessmentCriteria", "F1").await?,
            Some(json!({ "frameworkId": "F1" }))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_document_and_delete_are_not_errors() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.get("assessmentCriteria", "F404").await?, None);
        store.delete("assessmentCriteria", "F404").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_list_reads_sub_collection_in_name_order() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path());
        for id in ["D2", "D3", "D1"] {
            store
                .set("frameworks/F1/domains", id, json!({ "id": id }))
                .await?;
        }
        std::fs::write(dir.path().join("frameworks/F1/domains/notes.txt"), "ignored")?;

        let docs = store.list("frameworks/F1/domains").await?;
        let ids: Vec<&str> = docs.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["D1", "D2", "D3"]);

        assert!(store.list("frameworks/F9/domains").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupted_document_is_reported() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join("assessmentCriteria"))?;
        std::fs::write(dir.path().join("assessmentCriteria/F1.json"), "{ not json")?;

        let result = store.get("assessmentCriteria", "F1").await;
        assert!(matches!(result, Err(InfrastructureError::Json(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_path_traversal_is_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let result = store.get("assessmentCriteria", "..").await;
        assert!(matches!(result, Err(InfrastructureError::UnsafeKey(_))));
    }

    #[tokio::test]
    async fn test_concurrent_writes_all_land() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path());

        let writes = (0..8).map(|i| {
            let store = store.clone();
            async move {
                store
                    .set("frameworks/F1/domains", &format!("D{i}"), json!({ "id": format!("D{i}") }))
                    .await
            }
        });
        for result in futures::future::join_all(writes).await {
            result?;
        }

        let docs = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            store.list("frameworks/F1/domains"),
        )
        .await??;
        assert_eq!(docs.len(), 8);
        assert_eq!(docs[0]["id"], "D0");
        Ok(())
    }
}
