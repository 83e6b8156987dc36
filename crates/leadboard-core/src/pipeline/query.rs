use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date-desc" | "newest" => Ok(SortOrder::DateDesc),
            "date-asc" | "oldest" => Ok(SortOrder::DateAsc),
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            _ => Err(CoreError::InvalidSortOrder(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteVisitFilter {
    #[default]
    Any,
    Scheduled,
    NotScheduled,
}

impl FromStr for SiteVisitFilter {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(SiteVisitFilter::Any),
            "scheduled" | "yes" => Ok(SiteVisitFilter::Scheduled),
            "none" | "not-scheduled" | "no" => Ok(SiteVisitFilter::NotScheduled),
            _ => Err(CoreError::InvalidSiteVisitFilter(raw.to_string())),
        }
    }
}

/// Who is looking at the list. Agents only see clients assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerContext {
    #[default]
    Admin,
    Agent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientQuery {
    pub search: String,
    pub priority: Option<String>,
    pub site_visit: SiteVisitFilter,
    pub sort: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::{SiteVisitFilter, SortOrder};

    #[test]
    fn sort_order_round_trip() {
        for order in [
            SortOrder::DateDesc,
            SortOrder::DateAsc,
            SortOrder::NameAsc,
            SortOrder::NameDesc,
        ] {
            assert_eq!(order.as_str().parse::<SortOrder>(), Ok(order));
        }
    }

    #[test]
    fn invalid_selectors_are_errors() {
        assert!("price-asc".parse::<SortOrder>().is_err());
        assert!("maybe".parse::<SiteVisitFilter>().is_err());
    }
}
