use crate::possession::NOT_SPECIFIED;
use crate::price::format_inr_range;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Budget {
    Text(String),
    Range { min: Option<u64>, max: Option<u64> },
}

impl Default for Budget {
    fn default() -> Self {
        Budget::Text(NOT_SPECIFIED.to_string())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Text(text) => f.write_str(text),
            Budget::Range { min, max } => f.write_str(&format_inr_range(*min, *max)),
        }
    }
}

/// What a client is looking for. Absent values hold the literal
/// `"Not specified"` rather than `None` so the view layer never branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub property_type: String,
    pub budget: Budget,
    pub location: String,
    pub possession: String,
    pub configuration: String,
    pub size: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            property_type: NOT_SPECIFIED.to_string(),
            budget: Budget::default(),
            location: NOT_SPECIFIED.to_string(),
            possession: NOT_SPECIFIED.to_string(),
            configuration: NOT_SPECIFIED.to_string(),
            size: NOT_SPECIFIED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Budget, Preferences};

    #[test]
    fn defaults_are_not_specified() {
        let prefs = Preferences::default();
        assert_eq!(prefs.property_type, "Not specified");
        assert_eq!(prefs.budget.to_string(), "Not specified");
        assert_eq!(prefs.configuration, "Not specified");
    }

    #[test]
    fn range_budget_renders_in_rupees() {
        let budget = Budget::Range {
            min: Some(8_000_000),
            max: Some(12_000_000),
        };
        assert_eq!(budget.to_string(), "₹80 L - ₹1.2 Cr");
    }
}
