use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::course::CourseSchedule;
use crate::revenue::Order;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid {endpoint} payload: {source}")]
    Payload {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Course record as served by the course catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: i64,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub schedule: CourseSchedule,
}

impl Course {
    pub fn new(course_id: i64, teacher_id: Option<i64>, schedule: CourseSchedule) -> Self {
        Self {
            course_id,
            teacher_id,
            price: None,
            schedule,
        }
    }

    pub fn schedule(&self) -> &CourseSchedule {
        &self.schedule
    }

    pub fn title(&self) -> &str {
        &self.schedule.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub registration_id: Option<i64>,
    pub student_id: i64,
    pub course_id: i64,
}

impl Registration {
    pub fn new(student_id: i64, course_id: i64) -> Self {
        Self {
            registration_id: None,
            student_id,
            course_id,
        }
    }
}

pub fn parse_courses(payload: &str) -> CatalogResult<Vec<Course>> {
    serde_json::from_str(payload).map_err(|source| CatalogError::Payload {
        endpoint: "course",
        source,
    })
}

pub fn parse_course(payload: &str) -> CatalogResult<Course> {
    serde_json::from_str(payload).map_err(|source| CatalogError::Payload {
        endpoint: "course",
        source,
    })
}

pub fn parse_registrations(payload: &str) -> CatalogResult<Vec<Registration>> {
    serde_json::from_str(payload).map_err(|source| CatalogError::Payload {
        endpoint: "registration",
        source,
    })
}

/// Everything fetched from the catalog for one display request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl CatalogSnapshot {
    pub fn new(courses: Vec<Course>, registrations: Vec<Registration>) -> Self {
        Self {
            courses,
            registrations,
            orders: Vec::new(),
        }
    }

    pub fn find_course(&self, course_id: i64) -> Option<&Course> {
        self.courses.iter().find(|course| course.course_id == course_id)
    }

    /// Schedules of the courses a student is registered in, in registration
    /// order. Registrations for courses missing from the catalog are dropped.
    pub fn student_schedules(&self, student_id: i64) -> Vec<CourseSchedule> {
        let by_id: HashMap<i64, &Course> = self
            .courses
            .iter()
            .map(|course| (course.course_id, course))
            .collect();

        self.registrations
            .iter()
            .filter(|registration| registration.student_id == student_id)
            .filter_map(|registration| match by_id.get(&registration.course_id) {
                Some(course) => Some(course.schedule.clone()),
                None => {
                    warn!(
                        student_id,
                        course_id = registration.course_id,
                        "registration refers to an unknown course"
                    );
                    None
                }
            })
            .collect()
    }

    pub fn teacher_courses(&self, teacher_id: i64) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| course.teacher_id == Some(teacher_id))
            .collect()
    }

    pub fn teacher_schedules(&self, teacher_id: i64) -> Vec<CourseSchedule> {
        self.teacher_courses(teacher_id)
            .into_iter()
            .map(|course| course.schedule.clone())
            .collect()
    }

    pub fn students_in_course(&self, course_id: i64) -> usize {
        self.registrations
            .iter()
            .filter(|registration| registration.course_id == course_id)
            .count()
    }
}
