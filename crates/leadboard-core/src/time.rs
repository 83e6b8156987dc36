use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

// Anything above this is taken to be epoch milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an upstream timestamp into epoch seconds.
///
/// Naive values (no offset) are read as UTC so the same payload always
/// sorts the same way regardless of the viewer's timezone.
pub fn parse_timestamp(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).timestamp());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc().timestamp());
        }
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse::<i64>().ok().map(epoch_seconds);
    }

    None
}

pub fn format_timestamp_date(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .format("%Y-%m-%d")
        .to_string()
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn epoch_seconds(raw: i64) -> i64 {
    if raw.abs() >= EPOCH_MILLIS_THRESHOLD {
        raw / 1000
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp_date, format_timestamp_datetime, parse_timestamp};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_accepts_date_only() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(parse_timestamp("2024-06-01"), Some(expected));
    }

    #[test]
    fn parse_accepts_rfc3339_with_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 4, 30, 0).unwrap().timestamp();
        assert_eq!(parse_timestamp("2024-06-01T10:00:00+05:30"), Some(expected));
    }

    #[test]
    fn parse_accepts_naive_datetime_with_fraction() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap().timestamp();
        assert_eq!(parse_timestamp("2024-06-01T10:00:00.250"), Some(expected));
    }

    #[test]
    fn parse_accepts_epoch_millis() {
        assert_eq!(parse_timestamp("1717200000000"), Some(1_717_200_000));
        assert_eq!(parse_timestamp("1717200000"), Some(1_717_200_000));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn format_helpers_use_utc() {
        let ts = Utc.with_ymd_and_hms(2030, 1, 15, 13, 45, 0).unwrap().timestamp();
        assert_eq!(format_timestamp_date(ts), "2030-01-15");
        assert_eq!(format_timestamp_datetime(ts), "2030-01-15 13:45");
    }
}
