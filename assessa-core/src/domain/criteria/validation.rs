// assessa-core/src/domain/criteria/validation.rs

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::criteria::{CriteriaLevel, DomainWeight, WEIGHT_BUDGET, total_weight};
use crate::domain::wizard::{WizardDraft, WizardStep};

/// Field an error is displayed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorField {
    Levels,
    Domains,
    General,
}

impl ErrorField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Levels => "levels",
            Self::Domains => "domains",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ErrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-facing error. `code()` is the stable message key for translation tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum ErrorKey {
    NoLevels,
    LevelOrder,
    LevelRange,
    NoDomains,
    WeightRange,
    WeightSum { sum: f64 },
    LoadFailed,
    SaveFailed,
    DeleteFailed,
}

impl ErrorKey {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoLevels => "noLevels",
            Self::LevelOrder => "levelOrder",
            Self::LevelRange => "levelRange",
            Self::NoDomains => "noDomains",
            Self::WeightRange => "weightRange",
            Self::WeightSum { .. } => "weightSum",
            Self::LoadFailed => "loadFailed",
            Self::SaveFailed => "saveFailed",
            Self::DeleteFailed => "deleteFailed",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLevels => write!(f, "At least one capability level is required"),
            Self::LevelOrder => write!(f, "Level values must be strictly increasing"),
            Self::LevelRange => write!(f, "Level values must be between 0 and 100"),
            Self::NoDomains => write!(f, "The framework has no domains to weight"),
            Self::WeightRange => write!(f, "Domain weights must be between 0 and 100"),
            Self::WeightSum { sum } => {
                write!(f, "Domain weights must total {} (currently {})", WEIGHT_BUDGET, sum)
            }
            Self::LoadFailed => write!(f, "Failed to load assessment criteria"),
            Self::SaveFailed => write!(f, "Failed to save assessment criteria"),
            Self::DeleteFailed => write!(f, "Failed to delete assessment criteria"),
        }
    }
}

/// Errors keyed by field. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors(BTreeMap<ErrorField, Vec<ErrorKey>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: ErrorField, key: ErrorKey) -> Self {
        let mut errors = Self::new();
        errors.add(field, key);
        errors
    }

    /// Records `key` under `field`. A key already present is not repeated.
    pub fn add(&mut self, field: ErrorField, key: ErrorKey) {
        let keys = self.0.entry(field).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    /// Drops every error recorded under `field`.
    pub fn clear(&mut self, field: ErrorField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: ErrorField) -> &[ErrorKey] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `field` carries an error with the given code.
    pub fn has(&self, field: ErrorField, code: &str) -> bool {
        self.get(field).iter().any(|k| k.code() == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorField, &ErrorKey)> {
        self.0
            .iter()
            .flat_map(|(field, keys)| keys.iter().map(move |k| (*field, k)))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, key)| format!("{}: {} [{}]", field, key, key.code()))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Checks the draft against the rules of `step`. Pure; the draft is not touched.
pub fn validate_step(step: WizardStep, draft: &WizardDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    match step {
        WizardStep::Type | WizardStep::Preview => {}
        WizardStep::Levels => {
            if draft.criteria_type.requires_levels() {
                check_levels(&draft.levels, &mut errors);
            }
        }
        WizardStep::Domains => check_weights(&draft.domain_weights, &mut errors),
    }
    errors.into_result()
}

/// All rules that must hold before the draft is persisted.
pub fn validate_for_commit(draft: &WizardDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if draft.criteria_type.requires_levels() {
        check_levels(&draft.levels, &mut errors);
    }
    check_weights(&draft.domain_weights, &mut errors);
    errors.into_result()
}

fn check_levels(levels: &[CriteriaLevel], errors: &mut ValidationErrors) {
    if levels.is_empty() {
        errors.add(ErrorField::Levels, ErrorKey::NoLevels);
        return;
    }

    let increasing = levels.windows(2).all(|pair| pair[1].value > pair[0].value);
    if !increasing {
        errors.add(ErrorField::Levels, ErrorKey::LevelOrder);
    }

    if levels.iter().any(|l| !in_range(l.value)) {
        errors.add(ErrorField::Levels, ErrorKey::LevelRange);
    }
}

fn check_weights(weights: &[DomainWeight], errors: &mut ValidationErrors) {
    if weights.is_empty() {
        errors.add(ErrorField::Domains, ErrorKey::NoDomains);
        return;
    }

    if weights.iter().any(|w| !in_range(w.weight)) {
        errors.add(ErrorField::Domains, ErrorKey::WeightRange);
    }

    // UI increments accumulate float drift; compare the rounded total.
    let sum = total_weight(weights);
    if sum.round() != f64::from(WEIGHT_BUDGET) {
        errors.add(ErrorField::Domains, ErrorKey::WeightSum { sum });
    }
}

fn in_range(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}
