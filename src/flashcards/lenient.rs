//! Deserializers that repair malformed persisted fields instead of failing
//!
//! Stored documents may come from older exports or hand edits. A box outside
//! 1-5 is clamped, a negative or non-numeric counter becomes 0 and an
//! unparseable timestamp becomes null.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::models::{MAX_BOX, MIN_BOX};

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date as midnight UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                log::warn!("Treating unparseable timestamp {:?} as null", s);
            }
            parsed
        }
        Some(Value::Null) | None => None,
        Some(other) => {
            log::warn!("Treating non-string timestamp {} as null", other);
            None
        }
    })
}

pub fn timestamp_or_epoch<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_timestamp(deserializer)?.unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
}

/// Calendar day stored either as `YYYY-MM-DD` or as a full timestamp
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_timestamp(&s).map(|ts| ts.date_naive())),
        _ => None,
    })
}

pub fn box_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let level = raw
        .as_ref()
        .and_then(Value::as_f64)
        .map(|v| v.round().clamp(MIN_BOX as f64, MAX_BOX as f64) as u8)
        .unwrap_or(MIN_BOX);

    if raw.as_ref().and_then(Value::as_f64) != Some(level as f64) {
        log::warn!("Repaired card box {:?} to {}", raw, level);
    }
    Ok(level)
}

pub fn counter<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_f64)
        .map(|v| v.max(0.0).min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

pub fn counter_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_f64)
        .map(|v| v.max(0.0).round() as u64)
        .unwrap_or(0))
}

pub fn counter_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    counter_u64(deserializer).map(|v| usize::try_from(v).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let full = parse_timestamp("2024-05-01T10:30:00.000Z").unwrap();
        assert_eq!(full, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());

        let offset = parse_timestamp("2024-05-01T12:30:00+02:00").unwrap();
        assert_eq!(offset, full);

        let date_only = parse_timestamp("2024-05-01").unwrap();
        assert_eq!(date_only, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());

        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
