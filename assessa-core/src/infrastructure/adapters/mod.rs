// assessa-core/src/infrastructure/adapters/mod.rs

pub mod domain_source;
pub mod json_store;
pub mod memory;

pub use domain_source::{StoreDomainSource, domains_collection};
pub use json_store::JsonFileStore;
pub use memory::InMemoryDocumentStore;

use crate::infrastructure::error::InfrastructureError;

/// Rejects collection segments and keys that could escape their collection.
pub(crate) fn check_segment(segment: &str) -> Result<(), InfrastructureError> {
    let unsafe_segment = segment.trim().is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if unsafe_segment {
        return Err(InfrastructureError::UnsafeKey(segment.to_string()));
    }
    Ok(())
}

/// Validates every `/`-separated segment of a collection path.
pub(crate) fn check_collection(collection: &str) -> Result<Vec<&str>, InfrastructureError> {
    let segments: Vec<&str> = collection.split('/').collect();
    for segment in &segments {
        check_segment(segment)?;
    }
    Ok(segments)
}
