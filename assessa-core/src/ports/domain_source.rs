// assessa-core/src/ports/domain_source.rs

use async_trait::async_trait;

use crate::domain::criteria::Domain;
use crate::infrastructure::error::InfrastructureError;

/// Read access to the domains owned by the domain-management subsystem.
#[async_trait]
pub trait DomainSource: Send + Sync {
    /// Live domains of a framework, in a stable order.
    async fn list_domains(&self, framework_id: &str) -> Result<Vec<Domain>, InfrastructureError>;
}
