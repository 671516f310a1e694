// assessa-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::criteria::ValidationErrors;
use crate::domain::wizard::WizardStep;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Criteria can only be committed from the preview step (current step: {step})")]
    #[diagnostic(
        code(assessa::domain::wizard::commit),
        help("Advance the wizard through every step before saving.")
    )]
    CommitOutsidePreview { step: WizardStep },

    #[error("No criteria wizard is open")]
    #[diagnostic(code(assessa::domain::wizard::closed))]
    WizardClosed,

    #[error("Domain '{0}' is not part of this configuration")]
    #[diagnostic(
        code(assessa::domain::unknown_domain),
        help("Weights can only be set for the framework's live domains.")
    )]
    UnknownDomain(String),

    #[error("Level index {index} is out of bounds ({len} levels)")]
    #[diagnostic(code(assessa::domain::level_index))]
    LevelIndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid assessment criteria: {0}")]
    #[diagnostic(code(assessa::domain::invalid_criteria))]
    InvalidCriteria(ValidationErrors),
}
