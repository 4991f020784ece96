//! Redis-backed rate limit counters.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use common::{AppResult, RateLimitConfig};

use super::rate_limit::{RateLimitDecision, RateLimiter};

/// Cache key prefix for rate limiting
const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}

/// Fixed-window counters stored in Redis.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: ConnectionManager,
}

impl RedisRateLimiter {
    /// Use an existing connection manager.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn hit(&self, identifier: &str, limit: RateLimitConfig) -> AppResult<RateLimitDecision> {
        let key = rate_limit_key(identifier);
        let mut conn = self.conn.clone();

        let count: u64 = conn.incr(&key, 1u64).await?;

        // First hit opens the window
        if count == 1 {
            let window = i64::try_from(limit.window_seconds).unwrap_or(i64::MAX);
            conn.expire::<_, ()>(&key, window).await?;
        }

        Ok(RateLimitDecision {
            count,
            allowed: count <= limit.max_requests,
        })
    }
}
