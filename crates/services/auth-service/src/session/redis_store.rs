//! Redis-backed session store.

use async_trait::async_trait;
use chrono::Utc;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::warn;

use common::{AppError, AppResult};

use super::store::{Session, SessionStore};

/// Cache key prefix for sessions
const CACHE_PREFIX_SESSION: &str = "session:";

fn session_key(token: &str) -> String {
    format!("{}{}", CACHE_PREFIX_SESSION, token)
}

/// Parse a stored payload. Corrupt or expired payloads read as no session.
fn decode_session(token: &str, json: &str) -> Option<Session> {
    match serde_json::from_str::<Session>(json) {
        Ok(session) if session.token != token => {
            warn!("Stored session token mismatch");
            None
        }
        Ok(session) if session.is_expired(Utc::now()) => None,
        Ok(session) => Some(session),
        Err(e) => {
            warn!("Failed to deserialize stored session: {}", e);
            None
        }
    }
}

/// Sessions stored as JSON with a Redis TTL matching their expiry.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    /// Use an existing connection manager.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, session: &Session) -> AppResult<()> {
        let ttl = session.seconds_remaining(Utc::now());
        if ttl == 0 {
            return Ok(());
        }

        let json = serde_json::to_string(session)
            .map_err(|e| AppError::internal(format!("Serialization error: {}", e)))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(session_key(&session.token), json, ttl.unsigned_abs())
            .await?;
        Ok(())
    }

    async fn find(&self, token: &str) -> AppResult<Option<Session>> {
        let mut conn = self.conn.clone();
        let stored: Option<String> = conn.get(session_key(token)).await?;
        Ok(stored.and_then(|json| decode_session(token, &json)))
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(session_key(token)).await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
