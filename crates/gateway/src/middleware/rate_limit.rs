//! Rate limiting middleware.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use common::{AppError, AppResult, RateLimitConfig};

use crate::state::AppState;

const HEADER_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const HEADER_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const HEADER_RETRY_AFTER: HeaderName = HeaderName::from_static("retry-after");

/// Counter state after one request was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub count: u64,
    pub allowed: bool,
}

/// Fixed-window request counter.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one request for `identifier` and report whether it is allowed
    async fn hit(&self, identifier: &str, limit: RateLimitConfig) -> AppResult<RateLimitDecision>;
}

/// Rate limit middleware for signed-in endpoints.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.config.rate_limit;
    rate_limit_internal(state, connect_info, request, next, limit).await
}

/// Rate limit middleware for the login endpoint (stricter).
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.config.auth_rate_limit;
    rate_limit_internal(state, connect_info, request, next, limit).await
}

async fn rate_limit_internal(
    state: AppState,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
    limit: RateLimitConfig,
) -> Response {
    let ip = client_ip(request.headers(), connect_info);
    let identifier = format!("{}:{}", request.uri().path(), ip);

    // Fail closed when the counter store is unavailable
    let decision = match state.rate_limiter.hit(&identifier, limit).await {
        Ok(decision) => decision,
        Err(e) => {
            warn!(error = ?e, "Rate limiter unavailable");
            return rate_limit_exceeded_response(limit);
        }
    };

    if !decision.allowed {
        return rate_limit_exceeded_response(limit);
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(HEADER_LIMIT, HeaderValue::from(limit.max_requests));
    headers.insert(
        HEADER_REMAINING,
        HeaderValue::from(limit.max_requests.saturating_sub(decision.count)),
    );

    response
}

fn client_ip(headers: &HeaderMap, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|h| h.to_str().ok()) {
        return real_ip.trim().to_string();
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_exceeded_response(limit: RateLimitConfig) -> Response {
    let mut response = AppError::TooManyRequests.into_response();

    let headers = response.headers_mut();
    headers.insert(HEADER_RETRY_AFTER, HeaderValue::from(limit.window_seconds));
    headers.insert(HEADER_REMAINING, HeaderValue::from_static("0"));
    headers.insert(HEADER_LIMIT, HeaderValue::from(limit.max_requests));

    response
}
