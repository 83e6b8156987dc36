use crate::domain::preferences::Preferences;
use crate::domain::property::PropertyRecord;
use crate::domain::source::SourceTag;
use serde::{Deserialize, Serialize};

/// A saved search belonging to the client with the same phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRecord {
    pub id: String,
    pub name: String,
    pub source: SourceTag,
    pub phone: String,
    pub preferences: Preferences,
    pub properties: Vec<PropertyRecord>,
    pub created_at: Option<i64>,
}
