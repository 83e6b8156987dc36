use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upstream system a record was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTag {
    #[default]
    LeadCrm,
    RequirementStore,
}

impl SourceTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            SourceTag::LeadCrm => "lead-crm",
            SourceTag::RequirementStore => "requirement-store",
        }
    }

    pub const fn all() -> &'static [SourceTag] {
        &[SourceTag::LeadCrm, SourceTag::RequirementStore]
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceTag {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "lead-crm" | "lead_crm" | "crm" | "lead" | "leads" => Ok(SourceTag::LeadCrm),
            "requirement-store" | "requirement_store" | "requirement" | "requirements" => {
                Ok(SourceTag::RequirementStore)
            }
            _ => Err(CoreError::InvalidSourceTag(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SourceTag;

    #[test]
    fn parse_round_trip() {
        for tag in SourceTag::all() {
            assert_eq!(tag.as_str().parse::<SourceTag>(), Ok(*tag));
        }
    }

    #[test]
    fn parse_accepts_short_forms() {
        assert_eq!("CRM".parse::<SourceTag>(), Ok(SourceTag::LeadCrm));
        assert_eq!("requirements".parse::<SourceTag>(), Ok(SourceTag::RequirementStore));
        assert!("sheet".parse::<SourceTag>().is_err());
    }
}
