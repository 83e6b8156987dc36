use crate::possession::{classify_possession, Possession};
use crate::price::{format_inr, format_inr_range};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One unit type offered inside a project (for example the 3BHK east-facing variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConfiguration {
    pub bhk: Option<String>,
    pub facing: Option<String>,
    pub price: Option<u64>,
    pub size: Option<String>,
}

/// A listing matched against a requirement. Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    pub project_name: String,
    pub area: Option<String>,
    pub configuration: Option<String>,
    pub base_price: Option<u64>,
    pub size: Option<String>,
    pub builder: Option<String>,
    pub possession: Option<String>,
    pub facing: Option<String>,
    pub property_type: Option<String>,
    pub rera: Option<String>,
    pub configurations: Vec<PropertyConfiguration>,
}

impl PropertyRecord {
    pub fn timeline(&self, today: NaiveDate) -> Possession {
        classify_possession(self.possession.as_deref().unwrap_or_default(), today)
    }

    /// Lowest and highest price across the base price and every variant.
    pub fn price_range(&self) -> Option<(u64, u64)> {
        let prices = self
            .base_price
            .into_iter()
            .chain(self.configurations.iter().filter_map(|config| config.price));
        prices.fold(None, |range, price| match range {
            None => Some((price, price)),
            Some((low, high)) => Some((low.min(price), high.max(price))),
        })
    }

    pub fn price_label(&self) -> Option<String> {
        self.price_range().map(|(low, high)| {
            if low == high {
                format_inr(low)
            } else {
                format_inr_range(Some(low), Some(high))
            }
        })
    }

    /// Distinct BHK codes offered, the listing's own first.
    pub fn bhk_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        let candidates = self
            .configuration
            .iter()
            .chain(self.configurations.iter().filter_map(|config| config.bhk.as_ref()));
        for bhk in candidates {
            if !options.iter().any(|existing| existing.eq_ignore_ascii_case(bhk)) {
                options.push(bhk.clone());
            }
        }
        options
    }
}
