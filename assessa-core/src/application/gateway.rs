// assessa-core/src/application/gateway.rs

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::domain::criteria::{AssessmentCriteria, CriteriaLevel, CriteriaType, Domain, DomainWeight};
use crate::error::AssessaError;
use crate::infrastructure::adapters::StoreDomainSource;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::{DocumentStore, DomainSource};

/// Collection holding one criteria document per framework, keyed by framework id.
pub const CRITERIA_COLLECTION: &str = "assessmentCriteria";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Loads, replaces and deletes a framework's assessment criteria.
///
/// Every store call is bounded by `timeout`. Failures are tagged per operation and
/// never retried here.
#[derive(Clone)]
pub struct CriteriaGateway {
    store: Arc<dyn DocumentStore>,
    domains: Arc<dyn DomainSource>,
    timeout: Duration,
}

impl CriteriaGateway {
    pub fn new(store: Arc<dyn DocumentStore>, domains: Arc<dyn DomainSource>) -> Self {
        Self {
            store,
            domains,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Gateway reading domains from the same store's `frameworks/<id>/domains` collection.
    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        let domains = Arc::new(StoreDomainSource::new(Arc::clone(&store)));
        Self::new(store, domains)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, InfrastructureError>
    where
        F: Future<Output = Result<T, InfrastructureError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| InfrastructureError::Timeout {
                operation,
                after: self.timeout,
            })?
    }

    /// `Ok(None)` when the framework has no criteria yet.
    #[instrument(skip(self))]
    pub async fn load(&self, framework_id: &str) -> Result<Option<AssessmentCriteria>, AssessaError> {
        let fetched = self
            .bounded("load", self.store.get(CRITERIA_COLLECTION, framework_id))
            .await
            .and_then(|doc| {
                doc.map(serde_json::from_value::<AssessmentCriteria>)
                    .transpose()
                    .map_err(InfrastructureError::from)
            });

        match fetched {
            Ok(criteria) => {
                debug!(found = criteria.is_some(), "Criteria loaded");
                Ok(criteria.map(AssessmentCriteria::normalized))
            }
            Err(source) => {
                error!(error = %source, "Failed to load assessment criteria");
                Err(AssessaError::LoadFailed {
                    framework_id: framework_id.to_string(),
                    source,
                })
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn load_domains(&self, framework_id: &str) -> Result<Vec<Domain>, AssessaError> {
        self.bounded("load_domains", self.domains.list_domains(framework_id))
            .await
            .map_err(|source| {
                error!(error = %source, "Failed to load framework domains");
                AssessaError::LoadFailed {
                    framework_id: framework_id.to_string(),
                    source,
                }
            })
    }

    /// Replaces the framework's document. `levels` never reaches the store for
    /// percentage criteria. The weight total is not re-checked: last write wins.
    #[instrument(skip(self, domain_weights, levels), fields(weights = domain_weights.len()))]
    pub async fn save(
        &self,
        framework_id: &str,
        criteria_type: CriteriaType,
        domain_weights: Vec<DomainWeight>,
        levels: Option<Vec<CriteriaLevel>>,
    ) -> Result<AssessmentCriteria, AssessaError> {
        let criteria =
            AssessmentCriteria::new(framework_id, criteria_type, levels, domain_weights, Utc::now());

        let written = match serde_json::to_value(&criteria) {
            Ok(document) => {
                self.bounded("save", self.store.set(CRITERIA_COLLECTION, framework_id, document))
                    .await
            }
            Err(e) => Err(InfrastructureError::from(e)),
        };

        match written {
            Ok(()) => {
                info!(criteria_type = %criteria_type, "Assessment criteria saved");
                Ok(criteria)
            }
            Err(source) => {
                error!(error = %source, "Failed to save assessment criteria");
                Err(AssessaError::SaveFailed {
                    framework_id: framework_id.to_string(),
                    source,
                })
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, framework_id: &str) -> Result<(), AssessaError> {
        match self
            .bounded("remove", self.store.delete(CRITERIA_COLLECTION, framework_id))
            .await
        {
            Ok(()) => {
                info!("Assessment criteria deleted");
                Ok(())
            }
            Err(source) => {
                error!(error = %source, "Failed to delete assessment criteria");
                Err(AssessaError::DeleteFailed {
                    framework_id: framework_id.to_string(),
                    source,
                })
            }
        }
    }
}
