pub mod access;
pub mod catalog;
pub mod config;
pub mod course;
pub mod event;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod projector;
pub mod revenue;
pub mod session;
pub mod time_of_day;
pub mod weekdays;

pub use access::{Access, View, authorize};
pub use catalog::{
    CatalogError, CatalogSnapshot, Course, Registration, parse_course, parse_courses,
    parse_registrations,
};
pub use config::{AppConfig, ConfigError, parse_utc_offset};
pub use course::CourseSchedule;
pub use event::CalendarEvent;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteSessionStore;
pub use persistence::{
    JsonFileSessionStore, PersistenceError, SessionStore, load_catalog_from_json,
    save_catalog_to_json, save_events_to_csv, save_events_to_json,
};
pub use projector::{Projection, ProjectionError, ProjectionFailure, ScheduleProjector};
pub use revenue::{Order, OrderDetail, course_revenue, daily_revenue, total_revenue};
pub use session::{Cart, Role, Session, SessionError};
pub use time_of_day::{parse_calendar_date, parse_time_of_day};
pub use weekdays::ActiveWeekdays;
