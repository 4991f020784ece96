//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use auth_service_lib::LoginResponse;
use common::AppResult;
use domain::AuthenticatedIdentity;

use crate::extractors::ValidatedJson;
use crate::middleware::{CurrentUser, SessionToken};
use crate::state::AppState;

/// Login request.
///
/// Fields are not format-checked here; every rejected input produces the
/// same invalid-credentials response.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Email address (case and surrounding whitespace ignored)
    #[serde(default)]
    #[schema(example = "admin@example.com")]
    pub email: String,
    /// Password
    #[serde(default)]
    #[schema(example = "admin123")]
    pub password: String,
}

/// Routes reachable without a session
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Routes that need a session
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// Sign in and open a session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(response))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> AppResult<StatusCode> {
    state.auth.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Identity bound to the current session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current identity", body = AuthenticatedIdentity),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(Extension(current_user): Extension<CurrentUser>) -> Json<AuthenticatedIdentity> {
    Json(AuthenticatedIdentity::from(current_user))
}
