//! Possession-date normalization.
//!
//! Listings carry possession dates as free text ("RTM", "2027", "01/09/28",
//! "2028-03-15", "Dec 2027"). `classify_possession` reduces them to a coarse
//! timeline bucket relative to an injected `today`; input it cannot read is
//! handed back untouched.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOT_SPECIFIED: &str = "Not specified";

const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

const DAY_FIRST_FORMATS: [&str; 4] = ["%d %B %Y", "%d %b %Y", "%B %d, %Y", "%b %d, %Y"];
const MONTH_YEAR_FORMATS: [&str; 2] = ["%d %B %Y", "%d %b %Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineBucket {
    NotSpecified,
    ReadyToMove,
    ThreeToSixMonths,
    SixToTwelveMonths,
    OneToTwoYears,
    MoreThanTwoYears,
}

impl TimelineBucket {
    pub const fn as_str(self) -> &'static str {
        match self {
            TimelineBucket::NotSpecified => NOT_SPECIFIED,
            TimelineBucket::ReadyToMove => "Ready To Move In",
            TimelineBucket::ThreeToSixMonths => "3-6 months",
            TimelineBucket::SixToTwelveMonths => "6-12 months",
            TimelineBucket::OneToTwoYears => "1-2 years",
            TimelineBucket::MoreThanTwoYears => "More than 2 years",
        }
    }
}

impl fmt::Display for TimelineBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Possession {
    Bucket(TimelineBucket),
    Unrecognized(String),
}

impl Possession {
    pub fn bucket(&self) -> Option<TimelineBucket> {
        match self {
            Possession::Bucket(bucket) => Some(*bucket),
            Possession::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Possession::Bucket(bucket) => bucket.as_str(),
            Possession::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for Possession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn normalize_possession(raw: &str, today: NaiveDate) -> String {
    classify_possession(raw, today).to_string()
}

pub fn classify_possession(raw: &str, today: NaiveDate) -> Possession {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Possession::Bucket(TimelineBucket::NotSpecified);
    }

    if trimmed.eq_ignore_ascii_case("RTM") || trimmed.eq_ignore_ascii_case("READY TO MOVE IN") {
        return Possession::Bucket(TimelineBucket::ReadyToMove);
    }

    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return match trimmed.parse::<i32>() {
            Ok(year) => Possession::Bucket(bucket_for_year(year, today.year())),
            Err(_) => unrecognized(raw),
        };
    }

    let target = if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        Some(stamp.date_naive())
    } else if trimmed.contains('/') {
        parse_slashed(trimmed)
    } else if trimmed.contains('-') {
        parse_dashed(trimmed)
    } else {
        parse_generic(trimmed)
    };

    match target {
        Some(date) => Possession::Bucket(bucket_for_date(date, today)),
        None => unrecognized(raw),
    }
}

fn unrecognized(raw: &str) -> Possession {
    Possession::Unrecognized(raw.to_string())
}

fn bucket_for_year(year: i32, current_year: i32) -> TimelineBucket {
    if year <= current_year {
        TimelineBucket::ReadyToMove
    } else if year == current_year + 1 {
        TimelineBucket::SixToTwelveMonths
    } else if year == current_year + 2 {
        TimelineBucket::OneToTwoYears
    } else {
        TimelineBucket::MoreThanTwoYears
    }
}

pub fn months_until(target: NaiveDate, today: NaiveDate) -> i64 {
    let days = (target - today).num_days();
    (days as f64 / AVERAGE_DAYS_PER_MONTH).ceil() as i64
}

fn bucket_for_date(target: NaiveDate, today: NaiveDate) -> TimelineBucket {
    match months_until(target, today) {
        months if months <= 0 => TimelineBucket::ReadyToMove,
        months if months <= 6 => TimelineBucket::ThreeToSixMonths,
        months if months <= 12 => TimelineBucket::SixToTwelveMonths,
        months if months <= 24 => TimelineBucket::OneToTwoYears,
        _ => TimelineBucket::MoreThanTwoYears,
    }
}

// DD/MM/YY or DD/MM/YYYY
fn parse_slashed(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    ymd(expand_year(year)?, parse_part(month)?, parse_part(day)?)
}

// YYYY-MM-DD when the first part has four digits, DD-MM-YYYY otherwise.
fn parse_dashed(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('-').map(str::trim).collect();
    let [first, month, last] = parts.as_slice() else {
        return None;
    };
    if first.len() == 4 {
        ymd(parse_year(first)?, parse_part(month)?, parse_part(last)?)
    } else {
        ymd(expand_year(last)?, parse_part(month)?, parse_part(first)?)
    }
}

fn parse_generic(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y.%m.%d") {
        return Some(date);
    }
    for fmt in DAY_FIRST_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    // "Dec 2027" / "December 2027" resolve to the first of the month.
    let with_day = format!("1 {input}");
    MONTH_YEAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_day, fmt).ok())
}

fn parse_part(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_year(raw: &str) -> Option<i32> {
    parse_part(raw).and_then(|year| i32::try_from(year).ok())
}

// Only a two-digit year is shorthand for 20YY; any other width is literal.
fn expand_year(raw: &str) -> Option<i32> {
    let year = parse_year(raw)?;
    if raw.len() == 2 {
        Some(2000 + year)
    } else {
        Some(year)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
