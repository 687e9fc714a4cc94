use course_calendar::{Access, Role, Session, View, authorize};

fn session_as(role: Role) -> Session {
    let mut session = Session::default();
    session.sign_in(None, 1, role);
    session
}

#[test]
fn public_views_are_open_to_anyone() {
    let anonymous = Session::default();
    for view in [View::CourseList, View::Faq, View::Schools] {
        assert_eq!(authorize(&anonymous, view), Access::Allowed { view });
    }
}

#[test]
fn gated_views_need_the_exact_role() {
    let teacher = session_as(Role::Teacher);
    assert!(authorize(&teacher, View::TeacherDashboard).is_allowed());
    assert_eq!(
        authorize(&teacher, View::StudentSchedule),
        Access::Forbidden {
            view: View::StudentSchedule,
            required: Role::Student
        }
    );

    let admin = session_as(Role::Admin);
    assert!(authorize(&admin, View::AdminOrders).is_allowed());
    assert!(!authorize(&admin, View::TeacherCourses).is_allowed());

    assert!(!authorize(&Session::default(), View::StudentSchedule).is_allowed());
}

#[test]
fn paths_route_to_views() {
    assert_eq!(View::from_path("/"), Some(View::CourseList));
    assert_eq!(View::from_path("/student/schedule"), Some(View::StudentSchedule));
    assert_eq!(View::from_path("/teacher/dashboard"), Some(View::TeacherDashboard));
    assert_eq!(
        View::from_path("/teacher/dashboard/course_students/4"),
        Some(View::TeacherDashboard)
    );
    assert_eq!(View::from_path("/teacher/12/courses"), Some(View::TeacherCourses));
    assert_eq!(
        View::from_path("/teacher/course/detail/3"),
        Some(View::TeacherCourses)
    );
    assert_eq!(View::from_path("/admin/faq/"), Some(View::AdminFaq));
    assert_eq!(View::from_path("/nowhere"), None);
}

#[test]
fn forbidden_access_serializes_with_tag() {
    let value = serde_json::to_value(authorize(&Session::default(), View::AdminDashboard)).unwrap();
    assert_eq!(value["access"], "forbidden");
    assert_eq!(value["view"], "admin_dashboard");
    assert_eq!(value["required"], "ADMIN");
}
