//! Weekly schedule handlers.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::AppResult;
use domain::{Role, WeekWindow};
use schedule_service_lib::WeeklySchedule;

use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// `?weekOffset=` kept raw; malformed values mean the current week.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WeekQuery {
    /// Whole weeks from the current one, e.g. -1 or 2
    #[param(example = "1")]
    pub week_offset: Option<String>,
}

impl WeekQuery {
    fn raw(&self) -> Option<&str> {
        self.week_offset.as_deref()
    }
}

/// Create schedule routes
pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule/week", get(current_week))
        .route("/admin/schedule", get(admin_schedule))
        .route("/teacher/schedule", get(teacher_schedule))
        .route("/student/schedule", get(student_schedule))
}

/// Week window for the requested offset
#[utoipa::path(
    get,
    path = "/schedule/week",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(WeekQuery),
    responses(
        (status = 200, description = "Week window", body = WeekWindow),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn current_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Json<WeekWindow> {
    Json(state.schedules.week(query.raw()))
}

/// Every class in the week (admin only)
#[utoipa::path(
    get,
    path = "/admin/schedule",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(WeekQuery),
    responses(
        (status = 200, description = "Weekly schedule", body = WeeklySchedule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn admin_schedule(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeeklySchedule>> {
    dashboard(&state, &current_user, Role::Admin, &query).await
}

/// Classes taught by the signed-in teacher
#[utoipa::path(
    get,
    path = "/teacher/schedule",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(WeekQuery),
    responses(
        (status = 200, description = "Weekly schedule", body = WeeklySchedule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Teacher only")
    )
)]
pub async fn teacher_schedule(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeeklySchedule>> {
    dashboard(&state, &current_user, Role::Teacher, &query).await
}

/// Classes of the signed-in student's approved courses
#[utoipa::path(
    get,
    path = "/student/schedule",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    params(WeekQuery),
    responses(
        (status = 200, description = "Weekly schedule", body = WeeklySchedule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Student only")
    )
)]
pub async fn student_schedule(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeeklySchedule>> {
    dashboard(&state, &current_user, Role::Student, &query).await
}

async fn dashboard(
    state: &AppState,
    current_user: &CurrentUser,
    role: Role,
    query: &WeekQuery,
) -> AppResult<Json<WeeklySchedule>> {
    require_role(current_user, role)?;

    let schedule = state
        .schedules
        .weekly_schedule(current_user.id, role, query.raw())
        .await?;

    Ok(Json(schedule))
}
