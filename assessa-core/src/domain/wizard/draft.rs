// assessa-core/src/domain/wizard/draft.rs

use serde::Serialize;
use tracing::debug;

use crate::domain::criteria::weights::distribute_over_ids;
use crate::domain::criteria::{
    AssessmentCriteria, CriteriaLevel, CriteriaType, Domain, DomainWeight,
    distribute_equal_weights, reconcile_weights,
};
use crate::domain::error::DomainError;

/// In-progress configuration held by an open wizard. Never persisted as such.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WizardDraft {
    pub criteria_type: CriteriaType,
    pub levels: Vec<CriteriaLevel>,
    pub domain_weights: Vec<DomainWeight>,
}

/// Edit messages accepted by the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftUpdate {
    /// Switching type keeps already entered levels and weights.
    SetType(CriteriaType),
    SetLevels(Vec<CriteriaLevel>),
    SetDomainWeight(String, f64),
    AddLevel(CriteriaLevel),
    UpdateLevel { index: usize, level: CriteriaLevel },
    RemoveLevel(usize),
    /// Re-seeds equal weights over the domains already in the draft.
    DistributeEvenly,
}

impl WizardDraft {
    /// Starting draft for a wizard session.
    ///
    /// Existing criteria are loaded with their weights aligned to the live domains;
    /// otherwise the draft is a percentage configuration with equal weights.
    pub fn seeded(existing: Option<&AssessmentCriteria>, domains: &[Domain]) -> Self {
        match existing {
            Some(criteria) => Self {
                criteria_type: criteria.criteria_type,
                levels: criteria.levels.clone().unwrap_or_default(),
                domain_weights: reconcile_weights(&criteria.domain_weights, domains),
            },
            None => Self {
                criteria_type: CriteriaType::Percentage,
                levels: Vec::new(),
                domain_weights: distribute_equal_weights(domains),
            },
        }
    }

    pub fn apply(&mut self, update: DraftUpdate) -> Result<(), DomainError> {
        match update {
            DraftUpdate::SetType(kind) => self.criteria_type = kind,
            DraftUpdate::SetLevels(levels) => self.levels = levels,
            DraftUpdate::SetDomainWeight(domain_id, weight) => {
                let entry = self
                    .domain_weights
                    .iter_mut()
                    .find(|w| w.domain_id == domain_id)
                    .ok_or_else(|| DomainError::UnknownDomain(domain_id.clone()))?;
                let clamped = if weight.is_finite() {
                    weight.clamp(0.0, 100.0)
                } else {
                    0.0
                };
                if clamped != weight {
                    debug!(domain = %domain_id, requested = weight, applied = clamped, "Weight clamped");
                }
                entry.weight = clamped;
            }
            DraftUpdate::AddLevel(level) => self.levels.push(level),
            DraftUpdate::UpdateLevel { index, level } => {
                let len = self.levels.len();
                let slot = self
                    .levels
                    .get_mut(index)
                    .ok_or(DomainError::LevelIndexOutOfBounds { index, len })?;
                *slot = level;
            }
            DraftUpdate::RemoveLevel(index) => {
                let len = self.levels.len();
                if index >= len {
                    return Err(DomainError::LevelIndexOutOfBounds { index, len });
                }
                self.levels.remove(index);
            }
            DraftUpdate::DistributeEvenly => {
                let ids: Vec<&str> = self
                    .domain_weights
                    .iter()
                    .map(|w| w.domain_id.as_str())
                    .collect();
                self.domain_weights = distribute_over_ids(&ids);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::criteria::LocalizedText;
    use chrono::Utc;

    fn live_domains() -> Vec<Domain> {
        ["D1", "D2", "D3"]
            .iter()
            .map(|id| Domain::new(*id, LocalizedText::english(*id)))
            .collect()
    }

    fn level(value: f64) -> CriteriaLevel {
        CriteriaLevel::new(LocalizedText::english(format!("L{value}")), value)
    }

    #[test]
    fn test_seed_without_criteria_is_equal_percentage() {
        let draft = WizardDraft::seeded(None, &live_domains());
        assert_eq!(draft.criteria_type, CriteriaType::Percentage);
        assert!(draft.levels.is_empty());
        let values: Vec<f64> = draft.domain_weights.iter().map(|w| w.weight).collect();
        assert_eq!(values, vec![34.0, 33.0, 33.0]);
    }

    #[test]
    fn test_seed_from_existing_criteria() {
        let existing = AssessmentCriteria::new(
            "F1",
            CriteriaType::Maturity,
            Some(vec![level(25.0), level(75.0)]),
            vec![
                DomainWeight::new("D1", 50.0),
                DomainWeight::new("D2", 25.0),
                DomainWeight::new("D3", 25.0),
            ],
            Utc::now(),
        );
        let draft = WizardDraft::seeded(Some(&existing), &live_domains());
        assert_eq!(draft.criteria_type, CriteriaType::Maturity);
        assert_eq!(draft.levels.len(), 2);
        assert_eq!(draft.domain_weights, existing.domain_weights);
    }

    #[test]
    fn test_switching_type_keeps_levels() -> anyhow::Result<()> {
        let mut draft = WizardDraft::seeded(None, &live_domains());
        draft.apply(DraftUpdate::SetType(CriteriaType::Maturity))?;
        draft.apply(DraftUpdate::SetLevels(vec![level(10.0), level(90.0)]))?;
        draft.apply(DraftUpdate::SetType(CriteriaType::Percentage))?;
        draft.apply(DraftUpdate::SetType(CriteriaType::Compliance))?;
        assert_eq!(draft.levels.len(), 2);
        assert_eq!(draft.domain_weights.len(), 3);
        Ok(())
    }

    #[test]
    fn test_set_domain_weight() -> anyhow::Result<()> {
        let mut draft = WizardDraft::seeded(None, &live_domains());
        draft.apply(DraftUpdate::SetDomainWeight("D2".into(), 25.0))?;
        assert_eq!(draft.domain_weights[1].weight, 25.0);

        draft.apply(DraftUpdate::SetDomainWeight("D3".into(), 140.0))?;
        assert_eq!(draft.domain_weights[2].weight, 100.0);

        let err = draft.apply(DraftUpdate::SetDomainWeight("D7".into(), 10.0));
        assert!(matches!(err, Err(DomainError::UnknownDomain(id)) if id == "D7"));
        Ok(())
    }

    #[test]
    fn test_level_edits() -> anyhow::Result<()> {
        let mut draft = WizardDraft::default();
        draft.apply(DraftUpdate::AddLevel(level(10.0)))?;
        draft.apply(DraftUpdate::AddLevel(level(50.0)))?;
        draft.apply(DraftUpdate::UpdateLevel { index: 1, level: level(60.0) })?;
        assert_eq!(draft.levels[1].value, 60.0);

        draft.apply(DraftUpdate::RemoveLevel(0))?;
        assert_eq!(draft.levels.len(), 1);
        assert!(matches!(
            draft.apply(DraftUpdate::RemoveLevel(3)),
            Err(DomainError::LevelIndexOutOfBounds { index: 3, len: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_distribute_evenly_resets_weights() -> anyhow::Result<()> {
        let mut draft = WizardDraft::seeded(None, &live_domains());
        draft.apply(DraftUpdate::SetDomainWeight("D1".into(), 5.0))?;
        draft.apply(DraftUpdate::DistributeEvenly)?;
        assert_eq!(draft, WizardDraft::seeded(None, &live_domains()));
        Ok(())
    }
}
