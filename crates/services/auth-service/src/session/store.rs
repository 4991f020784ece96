//! Session record and storage trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::AppResult;
use domain::AuthenticatedIdentity;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Longest token accepted before any store lookup.
pub const MAX_TOKEN_LENGTH: usize = 128;

/// A signed-in identity bound to an opaque bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: AuthenticatedIdentity,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a fresh session with a random token.
    pub fn issue(identity: AuthenticatedIdentity, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().simple().to_string(),
            identity,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whole seconds until expiry, never negative.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Cheap shape check done before touching the store.
pub fn is_plausible_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LENGTH
        && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Session persistence.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a session until it expires
    async fn save(&self, session: &Session) -> AppResult<()>;

    /// Look up a live session by token
    async fn find(&self, token: &str) -> AppResult<Option<Session>>;

    /// Remove a session; unknown tokens are ignored
    async fn revoke(&self, token: &str) -> AppResult<()>;

    /// Check the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}
