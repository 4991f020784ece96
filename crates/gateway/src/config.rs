//! Gateway configuration.

use common::{
    env_parse, env_var, CacheConfig, DatabaseConfig, RateLimitConfig, ServiceConfig,
    SessionConfig,
};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address and service name
    pub service: ServiceConfig,
    /// Postgres connection settings
    pub database: DatabaseConfig,
    /// Redis connection for sessions and rate limiting
    pub redis: CacheConfig,
    /// Session lifetime
    pub session: SessionConfig,
    /// Minutes east of UTC used to decide "today" for week windows
    pub schedule_utc_offset_minutes: i32,
    /// General rate limit for signed-in routes
    pub rate_limit: RateLimitConfig,
    /// Stricter rate limit for the login endpoint
    pub auth_rate_limit: RateLimitConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                host: env_var(&["GATEWAY_HOST"]).unwrap_or(defaults.service.host),
                port: env_parse(&["GATEWAY_PORT"]).unwrap_or(defaults.service.port),
            },
            database: DatabaseConfig {
                url: env_var(&["DATABASE_URL"]).unwrap_or(defaults.database.url),
                max_connections: env_parse(&["DATABASE_MAX_CONNECTIONS"])
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env_parse(&["DATABASE_MIN_CONNECTIONS"])
                    .unwrap_or(defaults.database.min_connections),
            },
            redis: CacheConfig {
                url: env_var(&["GATEWAY_REDIS_URL", "REDIS_URL"]).unwrap_or(defaults.redis.url),
            },
            session: SessionConfig {
                ttl_hours: env_parse(&["SESSION_TTL_HOURS"])
                    .filter(|hours: &i64| *hours > 0)
                    .unwrap_or(defaults.session.ttl_hours),
            },
            schedule_utc_offset_minutes: env_parse(&["SCHEDULE_UTC_OFFSET_MINUTES"])
                .unwrap_or(defaults.schedule_utc_offset_minutes),
            rate_limit: RateLimitConfig {
                max_requests: env_parse(&["RATE_LIMIT_REQUESTS"])
                    .unwrap_or(defaults.rate_limit.max_requests),
                window_seconds: env_parse(&["RATE_LIMIT_WINDOW_SECONDS"])
                    .unwrap_or(defaults.rate_limit.window_seconds),
            },
            auth_rate_limit: RateLimitConfig {
                max_requests: env_parse(&["RATE_LIMIT_AUTH_REQUESTS"])
                    .unwrap_or(defaults.auth_rate_limit.max_requests),
                window_seconds: env_parse(&["RATE_LIMIT_AUTH_WINDOW_SECONDS"])
                    .unwrap_or(defaults.auth_rate_limit.window_seconds),
            },
        }
    }

    /// Override the bind address, e.g. from CLI flags.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.service.host = host;
        }
        if let Some(port) = port {
            self.service.port = port;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            database: DatabaseConfig::default(),
            redis: CacheConfig::default(),
            session: SessionConfig::default(),
            schedule_utc_offset_minutes: 0,
            rate_limit: RateLimitConfig::default(),
            auth_rate_limit: RateLimitConfig {
                max_requests: 10,
                window_seconds: 60,
            },
        }
    }
}
