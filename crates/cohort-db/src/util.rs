use chrono::{DateTime, SecondsFormat, Utc};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid enum value: {value}")]
    InvalidEnum { value: String },
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
}

/// Fixed-width so stored timestamps sort lexically in time order.
pub fn to_rfc3339(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn from_rfc3339(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::InvalidTimestamp {
            value: value.to_string(),
        })
}

pub fn decode_enum<T: FromStr>(value: &str) -> Result<T, DbError> {
    value.parse().map_err(|_| DbError::InvalidEnum {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_core::types::TaskStatus;

    #[test]
    fn timestamps_survive_storage_format() {
        let now = Utc::now();
        assert_eq!(from_rfc3339(&to_rfc3339(&now)).unwrap(), now);
    }

    #[test]
    fn stored_timestamps_sort_lexically() {
        let earlier = from_rfc3339("2024-01-20T10:00:05Z").unwrap();
        let later = from_rfc3339("2024-01-20T10:00:05.5Z").unwrap();
        assert!(to_rfc3339(&earlier) < to_rfc3339(&later));
    }

    #[test]
    fn decode_enum_reports_bad_values() {
        let err = decode_enum::<TaskStatus>("archived").unwrap_err();
        assert_eq!(err.to_string(), "invalid enum value: archived");
    }
}
