use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    CatalogSnapshot, CourseSchedule, Projection, ScheduleProjector,
    revenue::{REVENUE_WINDOW_DAYS, course_revenue, daily_revenue},
};

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RwLock<CatalogSnapshot>>,
    projector: ScheduleProjector,
}

impl AppState {
    pub fn new(catalog: CatalogSnapshot, projector: ScheduleProjector) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            projector,
        }
    }

    fn catalog(&self) -> Arc<RwLock<CatalogSnapshot>> {
        self.catalog.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RevenueQuery {
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct TeacherRevenue {
    total: f64,
    by_course: BTreeMap<i64, f64>,
    daily: [f64; REVENUE_WINDOW_DAYS],
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/project", post(project))
        .route("/catalog", get(get_catalog).put(replace_catalog))
        .route("/students/:id/schedule", get(student_schedule))
        .route("/teachers/:id/schedule", get(teacher_schedule))
        .route("/teachers/:id/revenue", get(teacher_revenue))
        .fallback(unknown_route)
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    catalog: CatalogSnapshot,
    projector: ScheduleProjector,
) -> std::io::Result<()> {
    let state = AppState::new(catalog, projector);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "schedule feed listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

async fn project(
    State(state): State<AppState>,
    payload: Result<Json<Vec<CourseSchedule>>, JsonRejection>,
) -> Result<Json<Projection>, ApiError> {
    let Json(schedules) = payload?;
    Ok(Json(state.projector.project(&schedules)))
}

async fn get_catalog(State(state): State<AppState>) -> Json<CatalogSnapshot> {
    let catalog = state.catalog();
    let snapshot = catalog.read().clone();
    Json(snapshot)
}

async fn replace_catalog(
    State(state): State<AppState>,
    payload: Result<Json<CatalogSnapshot>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(snapshot) = payload?;
    let catalog = state.catalog();
    info!(courses = snapshot.courses.len(), "catalog replaced");
    *catalog.write() = snapshot;
    Ok(StatusCode::NO_CONTENT)
}

async fn student_schedule(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Json<Projection> {
    let schedules = state.catalog().read().student_schedules(student_id);
    Json(state.projector.project(&schedules))
}

async fn teacher_schedule(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
) -> Json<Projection> {
    let schedules = state.catalog().read().teacher_schedules(teacher_id);
    Json(state.projector.project(&schedules))
}

async fn teacher_revenue(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
    Query(query): Query<RevenueQuery>,
) -> Json<TeacherRevenue> {
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    let catalog = state.catalog();
    let guard = catalog.read();
    let course_ids: Vec<i64> = guard
        .teacher_courses(teacher_id)
        .iter()
        .map(|course| course.course_id)
        .collect();
    let by_course: BTreeMap<i64, f64> = course_ids
        .iter()
        .map(|course_id| (*course_id, course_revenue(&guard.orders, *course_id)))
        .collect();
    Json(TeacherRevenue {
        total: by_course.values().sum(),
        daily: daily_revenue(&guard.orders, &course_ids, today),
        by_course,
    })
}
