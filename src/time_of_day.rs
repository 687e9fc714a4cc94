use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::projector::ProjectionError;

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a time-of-day value into an hour/minute pair.
///
/// Seconds and fractions are accepted but dropped; only the hour and minute
/// take part in event construction.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ProjectionError> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .and_then(|time| NaiveTime::from_hms_opt(time.hour(), time.minute(), 0))
        .ok_or_else(|| ProjectionError::MalformedTimeOfDay {
            value: value.to_string(),
        })
}

/// Parse the calendar-date part of a catalog date value.
///
/// Returns `None` for anything that does not carry a recognisable date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|stamp| stamp.date())
}

pub(crate) fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
