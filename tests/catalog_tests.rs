use chrono::{NaiveDate, NaiveTime, Weekday};
use course_calendar::{
    ActiveWeekdays, CatalogError, CatalogSnapshot, Course, CourseSchedule, PersistenceError,
    Registration, ScheduleProjector, load_catalog_from_json, parse_course, parse_courses,
    parse_registrations, save_catalog_to_json,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn schedule(title: &str) -> CourseSchedule {
    CourseSchedule::new(
        title,
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ActiveWeekdays::from_days([Weekday::Tue]),
    )
}

fn sample_catalog() -> CatalogSnapshot {
    CatalogSnapshot::new(
        vec![
            Course::new(1, Some(100), schedule("Algebra")),
            Course::new(2, Some(200), schedule("Biology")),
            Course::new(3, Some(100), schedule("Calculus")),
        ],
        vec![
            Registration::new(7, 3),
            Registration::new(8, 2),
            Registration::new(7, 1),
            Registration::new(7, 99),
        ],
    )
}

#[test]
fn student_schedules_follow_registration_order() {
    let catalog = sample_catalog();
    let titles: Vec<String> = catalog
        .student_schedules(7)
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Calculus", "Algebra"]);
    assert!(catalog.student_schedules(42).is_empty());
}

#[test]
fn teacher_schedules_follow_catalog_order() {
    let catalog = sample_catalog();
    let titles: Vec<String> = catalog
        .teacher_schedules(100)
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Algebra", "Calculus"]);
    assert_eq!(catalog.students_in_course(2), 1);
}

#[test]
fn selected_schedules_project_to_events() {
    let catalog = sample_catalog();
    let projection = ScheduleProjector::default().project(&catalog.student_schedules(7));
    // one Tuesday (2024-03-05) per course
    assert_eq!(projection.events.len(), 2);
    assert_eq!(projection.events[0].title, "Calculus");
}

#[test]
fn course_payload_round_trips_through_wire_names() {
    let json = r#"[{
        "courseId": 5,
        "teacherId": 100,
        "courseTitle": "Chemistry",
        "startDateAt": "2024-01-08",
        "endDateAt": "2024-01-31",
        "startTimeAt": "13:00",
        "endTimeAt": "14:00",
        "friday": true,
        "description": "ignored"
    }]"#;
    let courses = parse_courses(json).unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].course_id, 5);
    assert_eq!(courses[0].teacher_id, Some(100));
    assert_eq!(courses[0].title(), "Chemistry");
    assert!(courses[0].schedule().weekdays.friday);

    let value = serde_json::to_value(&courses[0]).unwrap();
    assert_eq!(value["courseTitle"], "Chemistry");
    assert_eq!(value["friday"], true);
}

#[test]
fn malformed_payloads_surface_as_payload_errors() {
    let err = parse_registrations(r#"[{"studentId": "seven", "courseId": 1}]"#).unwrap_err();
    let CatalogError::Payload { endpoint, .. } = &err;
    assert_eq!(*endpoint, "registration");
    assert!(err.to_string().starts_with("invalid registration payload"));

    assert!(matches!(
        parse_course(r#"{"courseId": 1}"#),
        Err(CatalogError::Payload { endpoint: "course", .. })
    ));
}

#[test]
fn catalog_snapshot_saves_and_loads() {
    let tmp = NamedTempFile::new().unwrap();
    let catalog = sample_catalog();
    save_catalog_to_json(&catalog, tmp.path()).unwrap();
    let loaded = load_catalog_from_json(tmp.path()).unwrap();
    assert_eq!(loaded, catalog);
}

#[test]
fn corrupt_catalog_file_is_a_payload_error() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{{ \"courses\": 3 }}").unwrap();
    let err = load_catalog_from_json(tmp.path()).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::Catalog(CatalogError::Payload {
            endpoint: "catalog",
            ..
        })
    ));
}
