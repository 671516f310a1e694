// assessa-core/src/infrastructure/adapters/domain_source.rs

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::criteria::Domain;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::document_store::DocumentStore;
use crate::ports::domain_source::DomainSource;

/// Sub-collection holding a framework's domains.
pub fn domains_collection(framework_id: &str) -> String {
    format!("frameworks/{framework_id}/domains")
}

/// Reads domains straight from the framework's `domains` sub-collection.
#[derive(Clone)]
pub struct StoreDomainSource {
    store: Arc<dyn DocumentStore>,
}

impl StoreDomainSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DomainSource for StoreDomainSource {
    async fn list_domains(&self, framework_id: &str) -> Result<Vec<Domain>, InfrastructureError> {
        let documents = self.store.list(&domains_collection(framework_id)).await?;

        let mut domains = Vec::with_capacity(documents.len());
        for doc in documents {
            match serde_json::from_value::<Domain>(doc) {
                Ok(domain) => domains.push(domain),
                // Un domaine illisible ne doit pas bloquer tout le framework
                Err(e) => warn!(framework = framework_id, error = %e, "Skipping malformed domain document"),
            }
        }
        domains.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(domains)
    }
}
