//! Time parsing through a fixed cascade of layouts.
//!
//! Layouts are tried in order: RFC 3339 (with or without fractional
//! seconds), `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `HH:MM:SS` and finally a
//! bare integer read as Unix seconds. Layouts without an offset are UTC.
//! A time-only value lands on `0000-01-01`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parses a string through the layout cascade.
pub fn parse_time(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(utc(d.and_time(NaiveTime::MIN)));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(utc(dt));
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return NaiveDate::from_ymd_opt(0, 1, 1).map(|d| utc(d.and_time(t)));
    }
    s.parse::<i64>().ok().and_then(from_unix)
}

/// Parses a JSON operand: strings go through the cascade, integers are Unix seconds.
pub fn parse_json_time(value: &serde_json::Value) -> Option<DateTime<FixedOffset>> {
    match value {
        serde_json::Value::String(s) => parse_time(s),
        serde_json::Value::Number(n) => n.as_i64().and_then(from_unix),
        _ => None,
    }
}

/// Returns `true` if the wall-clock time is exactly midnight in its own offset.
pub fn is_midnight(t: &DateTime<FixedOffset>) -> bool {
    t.time() == NaiveTime::MIN
}

pub(crate) fn from_unix(secs: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(DateTime::<FixedOffset>::from)
}

fn utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    naive.and_utc().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn rfc3339() {
        let t = parse_time("2024-01-01T12:00:00Z").unwrap();
        assert_eq!(t, at(2024, 1, 1, 12, 0, 0));

        let offset = parse_time("2024-01-01T00:00:00+02:00").unwrap();
        assert_eq!(offset, at(2023, 12, 31, 22, 0, 0));
        assert!(is_midnight(&offset));
    }

    #[test]
    fn rfc3339_with_millis() {
        let t = parse_time("2024-01-01T12:00:00.250Z").unwrap();
        assert_eq!(t.nanosecond(), 250_000_000);
        assert!(!is_midnight(&t));
    }

    #[test]
    fn date_only_is_utc_midnight() {
        let t = parse_time("2024-01-01").unwrap();
        assert_eq!(t, at(2024, 1, 1, 0, 0, 0));
        assert!(is_midnight(&t));
    }

    #[test]
    fn date_and_time_with_space() {
        let t = parse_time("2024-01-01 23:59:59").unwrap();
        assert_eq!(t, at(2024, 1, 1, 23, 59, 59));
    }

    #[test]
    fn time_only() {
        let t = parse_time("08:15:00").unwrap();
        assert_eq!(t.time(), NaiveTime::from_hms_opt(8, 15, 0).unwrap());
    }

    #[test]
    fn unix_seconds() {
        assert_eq!(parse_time("0").unwrap(), at(1970, 1, 1, 0, 0, 0));
        assert_eq!(
            parse_json_time(&serde_json::json!(1704067200)).unwrap(),
            at(2024, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_time("yesterday").is_none());
        assert!(parse_time("").is_none());
        assert!(parse_json_time(&serde_json::json!(true)).is_none());
        assert!(parse_json_time(&serde_json::json!(1.5)).is_none());
    }
}
