// assessa-core/src/domain/criteria/mod.rs

pub mod criteria_type;
pub mod localized;
pub mod validation;
pub mod weights;

pub use criteria_type::CriteriaType;
pub use localized::{Language, LocalizedText};
pub use validation::{ErrorField, ErrorKey, ValidationErrors, validate_step};
pub use weights::{WEIGHT_BUDGET, distribute_equal_weights, reconcile_weights, total_weight};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rung of a maturity or compliance scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaLevel {
    pub label: LocalizedText,
    pub value: f64,
    #[serde(default)]
    pub description: LocalizedText,
}

impl CriteriaLevel {
    pub fn new(label: LocalizedText, value: f64) -> Self {
        Self {
            label,
            value,
            description: LocalizedText::default(),
        }
    }
}

/// Share of the 100 point budget assigned to one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainWeight {
    pub domain_id: String,
    pub weight: f64,
}

impl DomainWeight {
    pub fn new(domain_id: impl Into<String>, weight: f64) -> Self {
        Self {
            domain_id: domain_id.into(),
            weight,
        }
    }
}

/// A framework domain as published by the domain-management subsystem. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    #[serde(default)]
    pub name: LocalizedText,
}

impl Domain {
    pub fn new(id: impl Into<String>, name: LocalizedText) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// The persisted configuration, one document per framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCriteria {
    pub framework_id: String,
    #[serde(rename = "type")]
    pub criteria_type: CriteriaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<CriteriaLevel>>,
    pub domain_weights: Vec<DomainWeight>,
    pub created_at: DateTime<Utc>,
}

impl AssessmentCriteria {
    /// Builds the aggregate, dropping `levels` when the type does not use them.
    pub fn new(
        framework_id: impl Into<String>,
        criteria_type: CriteriaType,
        levels: Option<Vec<CriteriaLevel>>,
        domain_weights: Vec<DomainWeight>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let levels = if criteria_type.requires_levels() {
            levels
        } else {
            None
        };
        Self {
            framework_id: framework_id.into(),
            criteria_type,
            levels,
            domain_weights,
            created_at,
        }
    }

    /// Re-applies the levels/type invariant, e.g. after reading a document written by another client.
    pub fn normalized(self) -> Self {
        let Self {
            framework_id,
            criteria_type,
            levels,
            domain_weights,
            created_at,
        } = self;
        Self::new(framework_id, criteria_type, levels, domain_weights, created_at)
    }
}
