//! Middleware for sessions and rate limiting.

mod auth;
mod cache;
mod rate_limit;

pub use auth::{require_role, session_middleware, CurrentUser, SessionToken};
pub use cache::RedisRateLimiter;
pub use rate_limit::{
    rate_limit_auth_middleware, rate_limit_middleware, RateLimitDecision, RateLimiter,
};
