use crate::domain::PropertyRecord;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDto {
    #[serde(flatten)]
    pub property: PropertyRecord,
    pub timeline: String,
    pub price_label: Option<String>,
}

impl PropertyDto {
    pub fn from_record(property: PropertyRecord, today: NaiveDate) -> Self {
        let timeline = property.timeline(today).to_string();
        let price_label = property.price_label();
        Self {
            property,
            timeline,
            price_label,
        }
    }
}
