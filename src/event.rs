use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// One concrete, dated occurrence of a course, in the shape calendar widgets
/// consume (`{title, start, end, allDay}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub all_day: bool,
}

impl CalendarEvent {
    /// Zero or negative when the source slot ends before it starts.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
