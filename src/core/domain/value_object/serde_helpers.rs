//! Serde helpers for SWIS timestamps.
//!
//! SWIS returns `DateTime` columns either as RFC 3339 strings with an offset or
//! as naive ISO-8601 strings with up to seven fractional digits and no zone.
//! Naive values are UTC. Everything is normalised to `DateTime<Utc>` so that
//! timestamps are compared as instants, never as strings.

use crate::core::domain::error::ValidationError;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO-8601 timestamp into UTC.
pub(crate) fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            ValidationError::field(
                field,
                format!(
                    "'{}' is not an ISO 8601 timestamp (expected e.g. 2017-02-21T12:00:00Z)",
                    value
                ),
            )
        })
}

/// Formats a timestamp the way SWIS expects verb arguments: RFC 3339 with a `Z` suffix.
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Deserialization for optional SWIS `DateTime` columns.
pub mod swis_datetime_opt {
    use super::*;
    use serde::{Deserialize, Deserializer};

    /// Deserialize `null` or an ISO-8601 string into an optional UTC timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_timestamp("timestamp", &raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 2, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_equivalent_representations_normalise_to_same_instant() {
        let inputs = [
            "2017-02-21T12:00:00Z",
            "2017-02-21T12:00:00+00:00",
            "2017-02-21T14:00:00+02:00",
            "2017-02-21T12:00:00",
            "2017-02-21T12:00:00.0000000",
            "2017-02-21 12:00:00",
        ];
        for input in inputs {
            assert_eq!(parse_timestamp("t", input).unwrap(), noon(), "input {}", input);
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("unmanage_from", "tomorrow").is_err());
        assert!(parse_timestamp("unmanage_from", "2017-02-21").is_err());
    }

    #[test]
    fn test_format_uses_zulu_suffix() {
        assert_eq!(format_timestamp(&noon()), "2017-02-21T12:00:00Z");
    }

    #[derive(serde::Deserialize)]
    struct Row {
        #[serde(default, with = "swis_datetime_opt")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_optional_column() {
        let row: Row = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert_eq!(row.at, None);
        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.at, None);
        let row: Row = serde_json::from_str(r#"{"at": "2017-02-21T12:00:00.0000000Z"}"#).unwrap();
        assert_eq!(row.at, Some(noon()));
    }
}
