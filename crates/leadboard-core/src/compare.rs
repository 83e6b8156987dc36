//! Side-by-side comparison of matched listings.

use crate::domain::PropertyRecord;
use crate::reconcile::NOT_AVAILABLE;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

pub fn compare_properties(properties: &[PropertyRecord], today: NaiveDate) -> Vec<ComparisonRow> {
    let row = |label: &'static str, value: &dyn Fn(&PropertyRecord) -> String| ComparisonRow {
        label,
        values: properties.iter().map(value).collect(),
    };

    vec![
        row("Project", &|p| p.project_name.clone()),
        row("Builder", &|p| or_na(p.builder.as_deref())),
        row("Area", &|p| or_na(p.area.as_deref())),
        row("Configuration", &|p| {
            let options = p.bhk_options();
            if options.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                options.join(", ")
            }
        }),
        row("Price", &price_label),
        row("Size", &|p| or_na(p.size.as_deref())),
        row("Facing", &|p| or_na(p.facing.as_deref())),
        row("Possession", &|p| p.timeline(today).to_string()),
        row("Property type", &|p| or_na(p.property_type.as_deref())),
        row("RERA", &|p| or_na(p.rera.as_deref())),
    ]
}

fn price_label(property: &PropertyRecord) -> String {
    property
        .price_label()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

#[cfg(test)]
mod tests {
    use super::compare_properties;
    use crate::domain::{PropertyConfiguration, PropertyRecord};
    use chrono::NaiveDate;

    fn listing(name: &str, price: Option<u64>, possession: &str) -> PropertyRecord {
        PropertyRecord {
            id: format!("{name}-0"),
            project_name: name.to_string(),
            area: None,
            configuration: Some("2BHK".to_string()),
            base_price: price,
            size: None,
            builder: Some("Brigade".to_string()),
            possession: Some(possession.to_string()),
            facing: None,
            property_type: None,
            rera: None,
            configurations: Vec::new(),
        }
    }

    #[test]
    fn rows_have_one_value_per_listing() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut second = listing("Orchards", Some(9_000_000), "2028");
        second.configurations.push(PropertyConfiguration {
            bhk: Some("3BHK".to_string()),
            facing: Some("North".to_string()),
            price: Some(13_500_000),
            size: None,
        });
        let rows = compare_properties(&[listing("Meadows", None, "RTM"), second], today);

        let price = rows.iter().find(|row| row.label == "Price").expect("price row");
        assert_eq!(price.values, vec!["N/A", "₹90 L - ₹1.35 Cr"]);

        let possession = rows.iter().find(|row| row.label == "Possession").expect("row");
        assert_eq!(possession.values, vec!["Ready To Move In", "1-2 years"]);

        let config = rows.iter().find(|row| row.label == "Configuration").expect("row");
        assert_eq!(config.values, vec!["2BHK", "2BHK, 3BHK"]);
    }
}
