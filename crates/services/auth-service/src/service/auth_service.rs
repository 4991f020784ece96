//! Authentication service - login, session resolution and logout.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use common::{AppError, AppResult};
use domain::{AuthenticatedIdentity, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

use super::verifier::CredentialVerifier;
use crate::session::{is_plausible_token, Session, SessionStore};

/// Response returned after a successful login
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque session token
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Session lifetime in seconds
    pub expires_in: i64,
    /// Signed-in identity
    pub user: AuthenticatedIdentity,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and open a session
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse>;

    /// Resolve a session token to its identity
    async fn resolve_session(&self, token: &str) -> AppResult<AuthenticatedIdentity>;

    /// End a session
    async fn logout(&self, token: &str) -> AppResult<()>;

    /// Check the session store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    verifier: CredentialVerifier,
    sessions: Arc<dyn SessionStore>,
    session_ttl_hours: i64,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        verifier: CredentialVerifier,
        sessions: Arc<dyn SessionStore>,
        session_ttl_hours: i64,
    ) -> Self {
        Self {
            verifier,
            sessions,
            session_ttl_hours: session_ttl_hours.max(1),
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let identity = self.verifier.verify(email, password).await?;

        let session = Session::issue(identity, Duration::hours(self.session_ttl_hours));
        self.sessions.save(&session).await?;

        info!(user_id = session.identity.id, role = %session.identity.role, "Session opened");

        Ok(LoginResponse {
            token: session.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.session_ttl_hours * SECONDS_PER_HOUR,
            user: session.identity,
        })
    }

    async fn resolve_session(&self, token: &str) -> AppResult<AuthenticatedIdentity> {
        if !is_plausible_token(token) {
            return Err(AppError::Unauthorized);
        }

        let session = self
            .sessions
            .find(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if session.is_expired(Utc::now()) {
            debug!("Session expired");
            return Err(AppError::Unauthorized);
        }

        Ok(session.identity)
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        if is_plausible_token(token) {
            self.sessions.revoke(token).await?;
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.sessions.ping().await
    }
}
