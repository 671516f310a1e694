// assessa-core/src/domain/wizard/step.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::criteria::CriteriaType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Type,
    Levels,
    Domains,
    Preview,
}

impl WizardStep {
    /// Following step, or `None` from `Preview`. Percentage criteria skip `Levels`.
    pub fn next(self, criteria_type: CriteriaType) -> Option<WizardStep> {
        match self {
            Self::Type if criteria_type.requires_levels() => Some(Self::Levels),
            Self::Type => Some(Self::Domains),
            Self::Levels => Some(Self::Domains),
            Self::Domains => Some(Self::Preview),
            Self::Preview => None,
        }
    }

    /// Previous step, or `None` from `Type`. Mirrors the skip rule of [`WizardStep::next`].
    pub fn prev(self, criteria_type: CriteriaType) -> Option<WizardStep> {
        match self {
            Self::Type => None,
            Self::Levels => Some(Self::Type),
            Self::Domains if criteria_type.requires_levels() => Some(Self::Levels),
            Self::Domains => Some(Self::Type),
            Self::Preview => Some(Self::Domains),
        }
    }

    /// Steps visited for `criteria_type`, in order.
    pub fn path(criteria_type: CriteriaType) -> &'static [WizardStep] {
        if criteria_type.requires_levels() {
            &[Self::Type, Self::Levels, Self::Domains, Self::Preview]
        } else {
            &[Self::Type, Self::Domains, Self::Preview]
        }
    }

    /// 1-based position in the path for `criteria_type`.
    pub fn position(self, criteria_type: CriteriaType) -> Option<usize> {
        Self::path(criteria_type)
            .iter()
            .position(|s| *s == self)
            .map(|i| i + 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Levels => "levels",
            Self::Domains => "domains",
            Self::Preview => "preview",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_skips_levels_both_ways() {
        let kind = CriteriaType::Percentage;
        assert_eq!(WizardStep::Type.next(kind), Some(WizardStep::Domains));
        assert_eq!(WizardStep::Domains.prev(kind), Some(WizardStep::Type));
    }

    #[test]
    fn test_scaled_types_visit_levels() {
        for kind in [CriteriaType::Maturity, CriteriaType::Compliance] {
            assert_eq!(WizardStep::Type.next(kind), Some(WizardStep::Levels));
            assert_eq!(WizardStep::Levels.next(kind), Some(WizardStep::Domains));
            assert_eq!(WizardStep::Domains.prev(kind), Some(WizardStep::Levels));
            assert_eq!(WizardStep::Levels.prev(kind), Some(WizardStep::Type));
        }
    }

    #[test]
    fn test_path_endpoints() {
        for kind in CriteriaType::ALL {
            assert_eq!(WizardStep::Preview.next(kind), None);
            assert_eq!(WizardStep::Type.prev(kind), None);
            assert_eq!(WizardStep::Preview.prev(kind), Some(WizardStep::Domains));
        }
    }

    #[test]
    fn test_path_is_consistent_with_next() {
        for kind in CriteriaType::ALL {
            let path = WizardStep::path(kind);
            for pair in path.windows(2) {
                assert_eq!(pair[0].next(kind), Some(pair[1]));
                assert_eq!(pair[1].prev(kind), Some(pair[0]));
            }
        }
        assert_eq!(WizardStep::Preview.position(CriteriaType::Percentage), Some(3));
        assert_eq!(WizardStep::Levels.position(CriteriaType::Percentage), None);
    }
}
