//! Time utilities: parsing HH:MM, seconds since midnight, countdown formatting.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

pub fn seconds_of_day(t: NaiveTime) -> i64 {
    t.num_seconds_from_midnight() as i64
}

/// Drop seconds (and below), so comparisons happen at `HH:MM` granularity.
pub fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t)
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Countdown text: hours+minutes from one hour up, minutes+seconds from one
/// minute up, plain seconds below that.
pub fn format_remaining(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}小时{}分钟", hours, minutes)
    } else if minutes > 0 {
        format!("{}分{}秒", minutes, secs)
    } else {
        format!("{}秒", secs)
    }
}

/// serde helper: NaiveTime as "HH:MM".
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_time_picks_largest_unit() {
        assert_eq!(format_remaining(3 * 3600 + 5 * 60 + 9), "3小时5分钟");
        assert_eq!(format_remaining(125), "2分5秒");
        assert_eq!(format_remaining(42), "42秒");
        assert_eq!(format_remaining(-7), "0秒");
    }

    #[test]
    fn truncation_keeps_hour_and_minute() {
        let t = NaiveTime::from_hms_opt(9, 55, 41).unwrap();
        assert_eq!(truncate_to_minute(t), NaiveTime::from_hms_opt(9, 55, 0).unwrap());
    }
}
