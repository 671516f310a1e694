// assessa-core/src/domain/wizard/machine.rs

use tracing::debug;

use crate::domain::criteria::validation::validate_for_commit;
use crate::domain::criteria::{
    CriteriaLevel, CriteriaType, DomainWeight, ErrorField, ErrorKey, ValidationErrors,
    validate_step,
};
use crate::domain::error::DomainError;
use crate::domain::wizard::{DraftUpdate, WizardDraft, WizardStep};

/// Result of a forward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved(WizardStep),
    /// Validation refused the move; errors are on the wizard.
    Blocked,
    /// `next` was invoked on `Preview`: the draft is ready to be committed.
    Complete,
}

/// A validated draft ready for the gateway. `levels` is `None` for percentage criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedCriteria {
    pub criteria_type: CriteriaType,
    pub levels: Option<Vec<CriteriaLevel>>,
    pub domain_weights: Vec<DomainWeight>,
}

/// Step sequence of the criteria wizard. Performs no I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaWizard {
    step: WizardStep,
    draft: WizardDraft,
    errors: ValidationErrors,
}

impl CriteriaWizard {
    pub fn open(draft: WizardDraft) -> Self {
        Self {
            step: WizardStep::Type,
            draft,
            errors: ValidationErrors::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn go_to_next_step(&mut self) -> Transition {
        if let Err(errors) = validate_step(self.step, &self.draft) {
            debug!(step = %self.step, %errors, "Transition blocked");
            self.errors = errors;
            return Transition::Blocked;
        }
        self.errors = ValidationErrors::new();

        match self.step.next(self.draft.criteria_type) {
            Some(next) => {
                debug!(from = %self.step, to = %next, "Wizard advanced");
                self.step = next;
                Transition::Moved(next)
            }
            None => Transition::Complete,
        }
    }

    /// Moves back without validation. Stays on `Type`.
    pub fn go_to_prev_step(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev(self.draft.criteria_type) {
            self.step = prev;
        }
        self.errors = ValidationErrors::new();
        self.step
    }

    pub fn update_draft(&mut self, update: DraftUpdate) -> Result<(), DomainError> {
        self.draft.apply(update)
    }

    /// Surfaces an error that did not come from step validation (e.g. a failed save).
    pub fn report(&mut self, field: ErrorField, key: ErrorKey) {
        self.errors.add(field, key);
    }

    /// Final check before persistence. Only legal on `Preview`.
    ///
    /// Validation failures are recorded on the wizard and returned as
    /// `InvalidCriteria`; the draft is left untouched.
    pub fn commit(&mut self) -> Result<FinalizedCriteria, DomainError> {
        if self.step != WizardStep::Preview {
            return Err(DomainError::CommitOutsidePreview { step: self.step });
        }
        if let Err(errors) = validate_for_commit(&self.draft) {
            self.errors = errors.clone();
            return Err(DomainError::InvalidCriteria(errors));
        }
        self.errors = ValidationErrors::new();

        let levels = self
            .draft
            .criteria_type
            .requires_levels()
            .then(|| self.draft.levels.clone());

        Ok(FinalizedCriteria {
            criteria_type: self.draft.criteria_type,
            levels,
            domain_weights: self.draft.domain_weights.clone(),
        })
    }
}
