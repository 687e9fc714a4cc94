use std::iter;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::course::CourseSchedule;
use crate::event::CalendarEvent;
use crate::time_of_day::parse_time_of_day;

/// Offset of the deployment the course times are written in (UTC+7).
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 7 * 3600;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("malformed time of day '{value}' (expected HH:MM)")]
    MalformedTimeOfDay { value: String },
    #[error("{date} {time} cannot be represented at offset {offset}")]
    UnrepresentableInstant {
        date: NaiveDate,
        time: NaiveTime,
        offset: FixedOffset,
    },
}

/// A schedule that could not be projected, identified by its input position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionFailure {
    pub index: usize,
    pub title: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: ProjectionError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub events: Vec<CalendarEvent>,
    pub failures: Vec<ProjectionFailure>,
}

impl Projection {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Events if every schedule projected, otherwise the first failure.
    pub fn into_result(self) -> Result<Vec<CalendarEvent>, ProjectionFailure> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(self.events),
        }
    }
}

/// Expands recurring course schedules into dated calendar events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleProjector {
    offset: FixedOffset,
}

impl Default for ScheduleProjector {
    fn default() -> Self {
        let offset =
            FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

impl ScheduleProjector {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Project every schedule in input order. A schedule with malformed
    /// times is reported in `failures` and does not stop the batch.
    pub fn project(&self, schedules: &[CourseSchedule]) -> Projection {
        let results: Vec<_> = schedules
            .iter()
            .map(|schedule| self.project_schedule(schedule))
            .collect();
        Self::collect(schedules, results)
    }

    /// Same output as [`project`](Self::project), with schedules expanded
    /// on the rayon pool.
    pub fn project_parallel(&self, schedules: &[CourseSchedule]) -> Projection {
        let results: Vec<_> = schedules
            .par_iter()
            .map(|schedule| self.project_schedule(schedule))
            .collect();
        Self::collect(schedules, results)
    }

    pub fn project_schedule(
        &self,
        schedule: &CourseSchedule,
    ) -> Result<Vec<CalendarEvent>, ProjectionError> {
        let Some((first, last)) = schedule.date_range() else {
            debug!(title = %schedule.title, "skipping schedule without a usable date range");
            return Ok(Vec::new());
        };
        let from = parse_time_of_day(&schedule.time_of_day_start)?;
        let to = parse_time_of_day(&schedule.time_of_day_end)?;

        let mut events = Vec::new();
        let days = iter::successors(Some(first), |date| date.succ_opt());
        for date in days.take_while(|date| *date <= last) {
            if !schedule.weekdays.is_active(date.weekday()) {
                continue;
            }
            events.push(CalendarEvent {
                title: schedule.title.clone(),
                start: self.anchor(date, from)?,
                end: self.anchor(date, to)?,
                all_day: false,
            });
        }
        Ok(events)
    }

    fn anchor(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<chrono::DateTime<FixedOffset>, ProjectionError> {
        self.offset
            .from_local_datetime(&NaiveDateTime::new(date, time))
            .single()
            .ok_or(ProjectionError::UnrepresentableInstant {
                date,
                time,
                offset: self.offset,
            })
    }

    fn collect(
        schedules: &[CourseSchedule],
        results: Vec<Result<Vec<CalendarEvent>, ProjectionError>>,
    ) -> Projection {
        let mut projection = Projection::default();
        for (index, (schedule, result)) in schedules.iter().zip(results).enumerate() {
            match result {
                Ok(events) => projection.events.extend(events),
                Err(error) => {
                    warn!(index, title = %schedule.title, %error, "schedule could not be projected");
                    projection.failures.push(ProjectionFailure {
                        index,
                        title: schedule.title.clone(),
                        error,
                    });
                }
            }
        }
        projection
    }
}

fn serialize_error<S>(error: &ProjectionError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}
