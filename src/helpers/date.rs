//! Date helper functions

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Parse a date string in the formats the content set uses
///
/// Returns `None` for anything that does not resolve to a real calendar
/// date; callers decide whether that is a validation failure or a value
/// to pass through untouched.
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

/// Current local date as the `%Y-%m-%d` string used for date defaults
pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let d = parse_date_string("2024-01-15").unwrap();
        assert_eq!(d.to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_slashed_date() {
        let d = parse_date_string("2024/01/15").unwrap();
        assert_eq!(d.to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_datetime() {
        let d = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(d.to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_rfc3339() {
        let d = parse_date_string("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(d.to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_date_string("not-a-date").is_none());
        assert!(parse_date_string("2024-13-45").is_none());
        assert!(parse_date_string("").is_none());
    }

    #[test]
    fn test_today_string_shape() {
        let today = today_string();
        assert_eq!(today.len(), 10);
        assert!(parse_date_string(&today).is_some());
    }
}
