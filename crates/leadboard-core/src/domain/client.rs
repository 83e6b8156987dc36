use crate::domain::preferences::Preferences;
use crate::domain::source::SourceTag;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub preferences: Preferences,
    pub last_contact: Option<i64>,
    pub matched_count: usize,
    pub priority: Option<String>,
    pub site_visit_at: Option<i64>,
    pub assigned_agent: Option<String>,
    pub source: SourceTag,
}

impl ClientRecord {
    pub fn has_site_visit(&self) -> bool {
        self.site_visit_at.is_some()
    }

    /// Text the search box is matched against, in display order.
    pub fn searchable_fields(&self) -> [String; 7] {
        [
            self.name.clone(),
            self.phone.clone(),
            self.location.clone(),
            self.preferences.property_type.clone(),
            self.preferences.budget.to_string(),
            self.preferences.location.clone(),
            self.preferences.configuration.clone(),
        ]
    }
}
