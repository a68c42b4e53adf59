use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::digits_up_to;

/// Mask up to 8 digits as `DD/MM/YYYY`.
pub fn format(value: &str) -> String {
    let d = digits_up_to(value, 8);
    match d.len() {
        0..=2 => d,
        3..=4 => format!("{}/{}", &d[..2], &d[2..]),
        _ => format!("{}/{}/{}", &d[..2], &d[2..4], &d[4..]),
    }
}

/// True for a `DD/MM/YYYY` string naming a real calendar day.
pub fn is_valid_br(value: &str) -> bool {
    parse_br(value).is_some()
}

/// Parse a birth date given either as `DD/MM/YYYY` or as ISO 8601
/// (`YYYY-MM-DD`, optionally a full RFC 3339 timestamp).
pub fn parse(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    parse_br(value)
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn parse_br(value: &str) -> Option<NaiveDate> {
    static BR_DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = BR_DATE_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("Failed to compile date regex")
    });

    let caps = regex.captures(value)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_progressively() {
        assert_eq!(format("3"), "3");
        assert_eq!(format("310"), "31/0");
        assert_eq!(format("3101"), "31/01");
        assert_eq!(format("310119"), "31/01/19");
        assert_eq!(format("31011990"), "31/01/1990");
        assert_eq!(format("31/01/1990 extra 12"), "31/01/1990");
    }

    #[test]
    fn parses_brazilian_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(1990, 1, 31);
        assert_eq!(parse("31/01/1990"), expected);
        assert_eq!(parse("1990-01-31"), expected);
        assert_eq!(parse("1990-01-31T00:00:00Z"), expected);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse("31/02/1990"), None);
        assert_eq!(parse("1/2/1990"), None);
        assert_eq!(parse("not a date"), None);
        assert!(!is_valid_br("1990-01-31"));
        assert!(is_valid_br("29/02/2000"));
    }
}
