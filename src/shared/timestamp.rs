//! Serde helpers for the textual timestamps kept in records and listings.
//!
//! Timestamps are written as RFC 3339 UTC with a fixed microsecond precision so
//! that their textual order matches their chronological order. Reading also
//! accepts naive ISO-8601 values without an offset, which are taken as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

/// Current time truncated to the precision that survives a write/read cycle
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(value) => Ok(value.with_timezone(&Utc)),
        Err(_) => raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
    }
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_is_fixed_width_utc() {
        let value = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format(&value), "2024-03-05T07:08:09.000000Z");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse("2024-03-05T09:08:09.5+02:00").unwrap();
        assert_eq!(format(&parsed), "2024-03-05T07:08:09.500000Z");
    }

    #[test]
    fn test_parse_naive_iso() {
        let parsed = parse("2024-03-05T07:08:09.123456").unwrap();
        assert_eq!(format(&parsed), "2024-03-05T07:08:09.123456Z");

        let whole_seconds = parse("2024-03-05T07:08:09").unwrap();
        assert_eq!(format(&whole_seconds), "2024-03-05T07:08:09.000000Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn test_now_survives_round_trip() {
        let value = now();
        assert_eq!(parse(&format(&value)).unwrap(), value);
    }
}
