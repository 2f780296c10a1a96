//! Date and time-of-day helpers.
//!
//! All date comparisons in the engine happen on calendar days in the local
//! timezone; `format_date` is the canonical key format. Times of day are
//! minute-precision and persisted as `"HH:mm"` strings via the serde modules
//! at the bottom.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

use crate::error::{WeekplanError, WeekplanResult};

/// Canonical `YYYY-MM-DD` date key.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> WeekplanResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| WeekplanError::TimeParse(format!("Invalid date '{s}'. Expected YYYY-MM-DD")))
}

/// Parse a 24-hour `HH:mm` time string.
pub fn parse_time(s: &str) -> WeekplanResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| WeekplanError::TimeParse(format!("Invalid time '{s}'. Expected HH:mm")))
}

/// Minutes since midnight.
pub fn time_to_minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// The ISO week (Monday start) containing `reference`, both bounds inclusive.
pub fn week_window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

/// Serde support for `NaiveTime` as an `"HH:mm"` string.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .map_err(|_| de::Error::custom(format!("invalid HH:mm time '{s}'")))
    }
}

/// Serde support for `Option<NaiveTime>` as an optional `"HH:mm"` string.
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid HH:mm time '{s}'"))),
            None => Ok(None),
        }
    }
}
