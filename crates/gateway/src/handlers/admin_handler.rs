//! Account administration handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{normalize_email, CreateUser, Role, UserResponse};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// Account creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Email address, trimmed and lowercased before validation
    #[serde(deserialize_with = "normalized_email")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "teacher@example.com")]
    pub email: String,
    /// Initial password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Access level
    pub role: Role,
}

fn normalized_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_email(&raw))
}

impl From<CreateUserRequest> for CreateUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            name: request.name,
            role: request.role,
        }
    }
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/users", get(list_users).post(create_user))
}

/// List all accounts (admin only)
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all accounts", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_role(&current_user, Role::Admin)?;
    let users = state.accounts.list_accounts().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create an account (admin only)
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_role(&current_user, Role::Admin)?;

    let user = state.accounts.create_account(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
