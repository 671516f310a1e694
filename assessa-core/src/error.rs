// assessa-core/src/error.rs

use crate::domain::criteria::ErrorKey;
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssessaError {
    // --- ERREURS DU DOMAINE (wizard, draft) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, parsing, config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ÉCHECS DU GATEWAY ---
    #[error("Failed to load assessment criteria for framework '{framework_id}': {source}")]
    LoadFailed {
        framework_id: String,
        #[source]
        source: InfrastructureError,
    },

    #[error("Failed to save assessment criteria for framework '{framework_id}': {source}")]
    SaveFailed {
        framework_id: String,
        #[source]
        source: InfrastructureError,
    },

    #[error("Failed to delete assessment criteria for framework '{framework_id}': {source}")]
    DeleteFailed {
        framework_id: String,
        #[source]
        source: InfrastructureError,
    },
}

impl AssessaError {
    /// The user-facing key for gateway failures.
    pub fn error_key(&self) -> Option<ErrorKey> {
        match self {
            Self::LoadFailed { .. } => Some(ErrorKey::LoadFailed),
            Self::SaveFailed { .. } => Some(ErrorKey::SaveFailed),
            Self::DeleteFailed { .. } => Some(ErrorKey::DeleteFailed),
            _ => None,
        }
    }
}
