use serde::{Deserialize, Serialize};

use crate::session::{Role, Session};

/// Screens of the storefront that navigation can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    CourseList,
    Faq,
    Schools,
    StudentSchedule,
    StudentCourses,
    TeacherDashboard,
    TeacherCourses,
    AdminDashboard,
    AdminOrders,
    AdminFaq,
    AdminSchools,
}

impl View {
    pub fn required_role(&self) -> Option<Role> {
        match self {
            View::CourseList | View::Faq | View::Schools => None,
            View::StudentSchedule | View::StudentCourses => Some(Role::Student),
            View::TeacherDashboard | View::TeacherCourses => Some(Role::Teacher),
            View::AdminDashboard | View::AdminOrders | View::AdminFaq | View::AdminSchools => {
                Some(Role::Admin)
            }
        }
    }

    pub fn from_path(path: &str) -> Option<View> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        let view = match segments.as_slice() {
            [] | ["courses"] => View::CourseList,
            ["faq"] => View::Faq,
            ["schools"] => View::Schools,
            ["student", "schedule"] => View::StudentSchedule,
            ["student", "courses"] => View::StudentCourses,
            ["teacher", "dashboard", ..] => View::TeacherDashboard,
            ["teacher", _, "courses"] | ["teacher", "course", ..] => View::TeacherCourses,
            ["admin", "dashboard"] => View::AdminDashboard,
            ["admin", "orders"] => View::AdminOrders,
            ["admin", "faq"] => View::AdminFaq,
            ["admin", "schools"] => View::AdminSchools,
            _ => return None,
        };
        Some(view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    Allowed { view: View },
    Forbidden { view: View, required: Role },
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed { .. })
    }
}

/// Decide once per navigation whether the session may open `view`.
/// Gated screens need the exact role; admins do not see teacher screens.
pub fn authorize(session: &Session, view: View) -> Access {
    match view.required_role() {
        None => Access::Allowed { view },
        Some(required) if session.role == Some(required) => Access::Allowed { view },
        Some(required) => Access::Forbidden { view, required },
    }
}
