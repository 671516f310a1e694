// assessa-core/src/domain/criteria/criteria_type.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoring methodology of a framework's assessment criteria.
///
/// `Percentage` scores domains directly by weight. `Maturity` and `Compliance`
/// additionally grade each control against an ordered scale of capability levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CriteriaType {
    #[default]
    Percentage,
    Maturity,
    Compliance,
}

impl CriteriaType {
    pub const ALL: [CriteriaType; 3] = [Self::Percentage, Self::Maturity, Self::Compliance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Maturity => "maturity",
            Self::Compliance => "compliance",
        }
    }

    /// Whether a configuration of this type carries capability levels.
    pub fn requires_levels(&self) -> bool {
        !matches!(self, Self::Percentage)
    }
}

impl fmt::Display for CriteriaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CriteriaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" => Ok(Self::Percentage),
            "maturity" => Ok(Self::Maturity),
            "compliance" => Ok(Self::Compliance),
            _ => Err(format!("Unknown criteria type: {}", s)),
        }
    }
}
