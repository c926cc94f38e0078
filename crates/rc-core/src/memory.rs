//! The memory register's persisted form.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A stored value: `{"kind": ..., "value": ...}`.
///
/// Numbers and durations store a double (durations in hours); clock times
/// and dates store their calendar value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MemoryRecord {
    Decimal(f64),
    ElapsedTime(f64),
    TimeOfDay(NaiveTime),
    Date(NaiveDate),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_and_value() {
        let json = serde_json::to_string(&MemoryRecord::ElapsedTime(1.5)).unwrap();
        assert_eq!(json, r#"{"kind":"elapsed_time","value":1.5}"#);

        let date = MemoryRecord::Date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"kind":"date","value":"2024-01-10"}"#);
        let parsed: MemoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn time_of_day_uses_clock_format() {
        let record: MemoryRecord =
            serde_json::from_str(r#"{"kind":"time_of_day","value":"21:15:00"}"#).unwrap();
        assert_eq!(
            record,
            MemoryRecord::TimeOfDay(NaiveTime::from_hms_opt(21, 15, 0).unwrap())
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<MemoryRecord, _> =
            serde_json::from_str(r#"{"kind":"weekday","value":3}"#);
        assert!(result.is_err());
    }
}
