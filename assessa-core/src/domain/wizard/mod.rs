// assessa-core/src/domain/wizard/mod.rs

pub mod draft;
pub mod machine;
pub mod step;

pub use draft::{DraftUpdate, WizardDraft};
pub use machine::{CriteriaWizard, FinalizedCriteria, Transition};
pub use step::WizardStep;
