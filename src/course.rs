use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::time_of_day::{format_time_of_day, parse_calendar_date};
use crate::weekdays::ActiveWeekdays;

/// A recurring weekly time slot bounded by a date range.
///
/// Values are kept in the shape the catalog serves them. Dates that are
/// missing or unreadable mean "no range" and are skipped during projection;
/// times are validated when the schedule is projected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSchedule {
    #[serde(rename = "courseTitle")]
    pub title: String,
    #[serde(rename = "startDateAt", default)]
    pub date_range_start: Option<String>,
    #[serde(rename = "endDateAt", default)]
    pub date_range_end: Option<String>,
    #[serde(rename = "startTimeAt")]
    pub time_of_day_start: String,
    #[serde(rename = "endTimeAt")]
    pub time_of_day_end: String,
    #[serde(flatten)]
    pub weekdays: ActiveWeekdays,
}

impl CourseSchedule {
    pub fn new(
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        from: NaiveTime,
        to: NaiveTime,
        weekdays: ActiveWeekdays,
    ) -> Self {
        Self {
            title: title.into(),
            date_range_start: Some(start.format("%Y-%m-%d").to_string()),
            date_range_end: Some(end.format("%Y-%m-%d").to_string()),
            time_of_day_start: format_time_of_day(from),
            time_of_day_end: format_time_of_day(to),
            weekdays,
        }
    }

    /// Inclusive date range, or `None` when either bound is missing,
    /// unparseable, or the range is inverted.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.date_range_start.as_deref().and_then(parse_calendar_date)?;
        let end = self.date_range_end.as_deref().and_then(parse_calendar_date)?;
        (start <= end).then_some((start, end))
    }
}
