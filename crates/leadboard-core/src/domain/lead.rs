use serde::{Deserialize, Serialize};

/// Prospect as delivered by the lead CRM; read-only for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub created_at: Option<i64>,
    pub status: Option<String>,
}
