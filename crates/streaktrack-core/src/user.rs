//! The persisted per-user record and timestamp normalization.
//!
//! A record is created on first login and mutated only by a successful
//! comment log. `total_days` is cumulative across the user's whole history;
//! `streak` is the current consecutive run, so `total_days >= streak` is
//! not an invariant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One user's streak record, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier, immutable after creation
    pub name: String,

    /// Current consecutive-activity count
    pub streak: u32,

    /// Cumulative count of all logged comments ever
    pub total_days: u32,

    /// When the user last logged a comment; absent for a brand-new user
    pub last_commented: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// The zero state created on first login.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            streak: 0,
            total_days: 0,
            last_commented: None,
        }
    }
}

/// Normalize a stored `last_commented` value into a UTC timestamp.
///
/// Accepts RFC 3339, a naive datetime, or a legacy date-only value
/// (normalized to midnight UTC). Normalization happens exactly once, when a
/// row is loaded, so the engine only ever sees a proper timestamp.
///
/// # Errors
/// Returns [`DataError::InvalidTimestamp`] when the value matches none of
/// the accepted forms. This is fatal by design: an unreadable timestamp
/// must surface, not silently zero a streak.
pub fn parse_last_commented(name: &str, raw: &str) -> Result<DateTime<Utc>, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        // Legacy date-only value: midnight of that date.
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    Err(DataError::InvalidTimestamp {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn new_record_zero_state() {
        let record = UserRecord::new("asha");
        assert_eq!(record.name, "asha");
        assert_eq!(record.streak, 0);
        assert_eq!(record.total_days, 0);
        assert!(record.last_commented.is_none());
    }

    #[test]
    fn parses_rfc3339() {
        let ts = parse_last_commented("asha", "2025-03-14T09:26:53+00:00").unwrap();
        assert_eq!(ts.hour(), 9);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_last_commented("asha", "2025-03-14T09:00:00+05:30").unwrap();
        assert_eq!(ts.hour(), 3);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn legacy_date_normalizes_to_midnight() {
        let ts = parse_last_commented("asha", "2025-03-14").unwrap();
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.minute(), 0);
        assert_eq!(ts.format("%Y-%m-%d").to_string(), "2025-03-14");
    }

    #[test]
    fn garbage_is_a_data_error() {
        let err = parse_last_commented("asha", "yesterday-ish").unwrap_err();
        match err {
            DataError::InvalidTimestamp { name, value } => {
                assert_eq!(name, "asha");
                assert_eq!(value, "yesterday-ish");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
