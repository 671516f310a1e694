// assessa-core/src/application/controller.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument, warn};

use crate::application::gateway::CriteriaGateway;
use crate::domain::criteria::{
    AssessmentCriteria, Domain, ErrorField, ErrorKey, ValidationErrors,
};
use crate::domain::error::DomainError;
use crate::domain::wizard::{CriteriaWizard, DraftUpdate, Transition, WizardDraft, WizardStep};
use crate::error::AssessaError;

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    Opened,
    Saved(AssessmentCriteria),
    Deleted,
    Closed,
}

pub type Subscriber = Arc<dyn Fn(&ControllerEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    Failed,
    /// Another open was pending, or the wizard was closed before loading finished.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Final validation failed; errors are on the wizard.
    Invalid,
    /// The gateway failed; the draft is kept for a retry.
    Failed,
    /// A save or delete was already in flight.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    Moved(WizardStep),
    Blocked,
    Committed(SaveOutcome),
}

/// Everything the presentation layer renders, copied out of the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub framework_id: String,
    pub is_open: bool,
    pub is_loading: bool,
    pub is_saving: bool,
    pub is_deleting: bool,
    pub has_criteria: bool,
    pub confirm_delete: bool,
    pub step: Option<WizardStep>,
    pub draft: Option<WizardDraft>,
    pub domains: Vec<Domain>,
    pub errors: ValidationErrors,
}

#[derive(Default)]
struct ControllerState {
    // Bumped on every open/close so late completions can tell their session is gone.
    session: u64,
    wizard: Option<CriteriaWizard>,
    domains: Vec<Domain>,
    is_loading: bool,
    is_saving: bool,
    is_deleting: bool,
    has_criteria: bool,
    confirm_delete: bool,
    errors: ValidationErrors,
}

/// Facade driving the criteria wizard of one framework.
///
/// The only component talking to the gateway. Locks are never held across an
/// await, so a wizard can be closed while a save is in flight; the save still
/// completes and its result lands in the persisted state only.
pub struct CriteriaController {
    framework_id: String,
    gateway: CriteriaGateway,
    state: Mutex<ControllerState>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl CriteriaController {
    pub fn new(gateway: CriteriaGateway, framework_id: impl Into<String>) -> Self {
        Self {
            framework_id: framework_id.into(),
            gateway,
            state: Mutex::new(ControllerState::default()),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    pub fn framework_id(&self) -> &str {
        &self.framework_id
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Subscriber)>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- OBSERVATION ---

    pub fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state();
        let mut errors = state
            .wizard
            .as_ref()
            .map(|w| w.errors().clone())
            .unwrap_or_default();
        for (field, key) in state.errors.iter() {
            errors.add(field, key.clone());
        }

        ControllerSnapshot {
            framework_id: self.framework_id.clone(),
            is_open: state.wizard.is_some(),
            is_loading: state.is_loading,
            is_saving: state.is_saving,
            is_deleting: state.is_deleting,
            has_criteria: state.has_criteria,
            confirm_delete: state.confirm_delete,
            step: state.wizard.as_ref().map(CriteriaWizard::step),
            draft: state.wizard.as_ref().map(|w| w.draft().clone()),
            domains: state.domains.clone(),
            errors,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state().wizard.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.state().is_saving
    }

    pub fn has_criteria(&self) -> bool {
        self.state().has_criteria
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ControllerEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers().push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers().retain(|(sub_id, _)| *sub_id != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers().len()
    }

    fn notify(&self, event: &ControllerEvent) {
        // Clone first: callbacks may (un)subscribe.
        let callbacks: Vec<Subscriber> = self
            .subscribers()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }

    fn teardown_subscriptions(&self) {
        self.notify(&ControllerEvent::Closed);
        self.subscribers().clear();
    }

    // --- LIFECYCLE ---

    /// Reloads `has_criteria` without opening the wizard.
    #[instrument(skip(self), fields(framework = %self.framework_id))]
    pub async fn refresh(&self) -> Result<bool, AssessaError> {
        match self.gateway.load(&self.framework_id).await {
            Ok(criteria) => {
                let exists = criteria.is_some();
                let mut state = self.state();
                state.has_criteria = exists;
                // The store answered: earlier gateway failures are stale.
                state.errors.clear(ErrorField::General);
                Ok(exists)
            }
            Err(e) => {
                let key = e.error_key().unwrap_or(ErrorKey::LoadFailed);
                self.state().errors.add(ErrorField::General, key);
                Err(e)
            }
        }
    }

    /// Fetches the saved criteria and the live domains concurrently, then opens a
    /// wizard seeded from them.
    #[instrument(skip(self), fields(framework = %self.framework_id))]
    pub async fn open_wizard(&self) -> OpenOutcome {
        let session = {
            let mut state = self.state();
            if state.is_loading {
                warn!("Wizard is already loading, ignoring open request");
                return OpenOutcome::Skipped;
            }
            state.is_loading = true;
            state.errors = ValidationErrors::new();
            state.session += 1;
            state.session
        };

        let (criteria, domains) = futures::future::join(
            self.gateway.load(&self.framework_id),
            self.gateway.load_domains(&self.framework_id),
        )
        .await;

        let mut state = self.state();
        state.is_loading = false;
        if state.session != session {
            debug!("Wizard closed while loading, discarding results");
            return OpenOutcome::Skipped;
        }

        match (criteria, domains) {
            (Ok(existing), Ok(domains)) => {
                state.has_criteria = existing.is_some();
                let draft = WizardDraft::seeded(existing.as_ref(), &domains);
                state.domains = domains;
                state.wizard = Some(CriteriaWizard::open(draft));
                drop(state);

                info!("Criteria wizard opened");
                self.notify(&ControllerEvent::Opened);
                OpenOutcome::Opened
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Could not open criteria wizard");
                let key = e.error_key().unwrap_or(ErrorKey::LoadFailed);
                state.errors.add(ErrorField::General, key);
                OpenOutcome::Failed
            }
        }
    }

    /// Drops the draft and every subscription. Persisted criteria are untouched.
    pub fn close_wizard(&self) {
        {
            let mut state = self.state();
            state.wizard = None;
            state.domains.clear();
            state.errors = ValidationErrors::new();
            state.session += 1;
        }
        debug!(framework = %self.framework_id, "Criteria wizard closed");
        self.teardown_subscriptions();
    }

    // --- WIZARD ---

    pub fn update_draft(&self, update: DraftUpdate) -> Result<(), AssessaError> {
        let mut state = self.state();
        let wizard = state.wizard.as_mut().ok_or(DomainError::WizardClosed)?;
        wizard.update_draft(update)?;
        Ok(())
    }

    pub fn go_to_prev_step(&self) -> Result<WizardStep, AssessaError> {
        let mut state = self.state();
        let wizard = state.wizard.as_mut().ok_or(DomainError::WizardClosed)?;
        Ok(wizard.go_to_prev_step())
    }

    /// Validates and advances. On `Preview` this commits the draft.
    pub async fn go_to_next_step(&self) -> Result<NextOutcome, AssessaError> {
        let transition = {
            let mut state = self.state();
            let wizard = state.wizard.as_mut().ok_or(DomainError::WizardClosed)?;
            wizard.go_to_next_step()
        };

        match transition {
            Transition::Moved(step) => Ok(NextOutcome::Moved(step)),
            Transition::Blocked => Ok(NextOutcome::Blocked),
            Transition::Complete => Ok(NextOutcome::Committed(self.save_criteria().await?)),
        }
    }

    /// Persists the draft of an open wizard sitting on `Preview`.
    ///
    /// Returns `Err` only for misuse (no wizard, wrong step). Gateway failures come
    /// back as `SaveOutcome::Failed` with a `general` error on the wizard.
    #[instrument(skip(self), fields(framework = %self.framework_id))]
    pub async fn save_criteria(&self) -> Result<SaveOutcome, AssessaError> {
        let (session, finalized) = {
            let mut state = self.state();
            if state.is_saving || state.is_deleting {
                warn!("A save or delete is already pending, ignoring save request");
                return Ok(SaveOutcome::Skipped);
            }
            let wizard = state.wizard.as_mut().ok_or(DomainError::WizardClosed)?;
            let finalized = match wizard.commit() {
                Ok(finalized) => finalized,
                Err(DomainError::InvalidCriteria(errors)) => {
                    debug!(%errors, "Save blocked by validation");
                    return Ok(SaveOutcome::Invalid);
                }
                Err(e) => return Err(e.into()),
            };
            state.is_saving = true;
            (state.session, finalized)
        };

        let result = self
            .gateway
            .save(
                &self.framework_id,
                finalized.criteria_type,
                finalized.domain_weights,
                finalized.levels,
            )
            .await;

        let mut state = self.state();
        state.is_saving = false;
        match result {
            Ok(saved) => {
                state.has_criteria = true;
                let still_open = state.session == session && state.wizard.is_some();
                if still_open {
                    state.wizard = None;
                    state.domains.clear();
                    state.session += 1;
                }
                drop(state);

                self.notify(&ControllerEvent::Saved(saved));
                if still_open {
                    self.teardown_subscriptions();
                }
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                error!(error = %e, "Saving criteria failed, draft kept");
                if state.session == session {
                    if let Some(wizard) = state.wizard.as_mut() {
                        let key = e.error_key().unwrap_or(ErrorKey::SaveFailed);
                        wizard.report(ErrorField::General, key);
                    }
                }
                Ok(SaveOutcome::Failed)
            }
        }
    }

    // --- DELETE ---

    pub fn request_delete(&self) {
        self.state().confirm_delete = true;
    }

    pub fn cancel_delete(&self) {
        self.state().confirm_delete = false;
    }

    #[instrument(skip(self), fields(framework = %self.framework_id))]
    pub async fn delete_criteria(&self) -> DeleteOutcome {
        {
            let mut state = self.state();
            if state.is_deleting || state.is_saving {
                warn!("A save or delete is already pending, ignoring delete request");
                return DeleteOutcome::Skipped;
            }
            state.is_deleting = true;
        }

        let result = self.gateway.remove(&self.framework_id).await;

        let mut state = self.state();
        state.is_deleting = false;
        match result {
            Ok(()) => {
                state.has_criteria = false;
                state.confirm_delete = false;
                state.errors = ValidationErrors::new();
                drop(state);

                self.notify(&ControllerEvent::Deleted);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, "Deleting criteria failed");
                let key = e.error_key().unwrap_or(ErrorKey::DeleteFailed);
                state.errors.add(ErrorField::General, key);
                DeleteOutcome::Failed
            }
        }
    }
}
