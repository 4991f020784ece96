//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::AuthService;
use schedule_service_lib::ScheduleService;
use user_service_lib::AccountService;

use crate::config::GatewayConfig;
use crate::middleware::RateLimiter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountService>,
    pub schedules: Arc<dyn ScheduleService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth: Arc<dyn AuthService>,
        accounts: Arc<dyn AccountService>,
        schedules: Arc<dyn ScheduleService>,
        rate_limiter: Arc<dyn RateLimiter>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth,
            accounts,
            schedules,
            rate_limiter,
            config,
        }
    }
}
