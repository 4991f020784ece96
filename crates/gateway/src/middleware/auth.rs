//! Session middleware and role gate.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::debug;

use common::{AppError, AppResult};
use domain::{AuthenticatedIdentity, Role};

use crate::state::AppState;

/// Current authenticated user resolved from the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<AuthenticatedIdentity> for CurrentUser {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
        }
    }
}

impl From<CurrentUser> for AuthenticatedIdentity {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Bearer token of the current request, kept for logout.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Allow only the exact role. Admins do not inherit other dashboards.
pub fn require_role(user: &CurrentUser, role: Role) -> AppResult<()> {
    if user.role == role {
        Ok(())
    } else {
        debug!(user_id = user.id, role = %user.role, required = %role, "Role gate denied");
        Err(AppError::Forbidden)
    }
}

/// Resolve the bearer session and attach the user to the request.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())?;

    let identity = state.auth.resolve_session(&token).await?;

    request.extensions_mut().insert(CurrentUser::from(identity));
    request.extensions_mut().insert(SessionToken(token));

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(headers: &HeaderMap) -> AppResult<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
