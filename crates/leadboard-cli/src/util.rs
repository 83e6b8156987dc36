use crate::error::invalid_input;
use anyhow::Result;
use chrono::NaiveDate;
use leadboard_core::domain::SourceTag;

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_input(format!("invalid date {raw:?}: expected YYYY-MM-DD")))
}

pub fn parse_source(raw: &str) -> Result<SourceTag> {
    raw.parse::<SourceTag>()
        .map_err(|_| invalid_input(format!("invalid source {raw:?}: expected leads|requirements")))
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|value| !value.trim().is_empty()).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::{or_dash, parse_date, parse_source};
    use leadboard_core::domain::SourceTag;

    #[test]
    fn parse_date_requires_iso_format() {
        assert!(parse_date("2026-10-16").is_ok());
        assert!(parse_date("16/10/2026").is_err());
    }

    #[test]
    fn parse_source_accepts_short_names() {
        assert_eq!(parse_source("leads").expect("leads"), SourceTag::LeadCrm);
        assert!(parse_source("sheet").is_err());
    }

    #[test]
    fn or_dash_fills_blanks() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some(" ")), "-");
        assert_eq!(or_dash(Some("high")), "high");
    }
}
