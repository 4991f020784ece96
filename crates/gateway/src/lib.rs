//! Course Portal Gateway Library
//!
//! HTTP API over the in-process auth, user and schedule services.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use redis::aio::ConnectionManager;
use tower_http::trace::TraceLayer;
use tracing::info;

use auth_service_lib::{Authenticator, CredentialVerifier, RedisSessionStore, UserDirectory};
use domain::{CreateUser, SystemClock, UserResponse};
use schedule_service_lib::{ScheduleManager, ScheduleStore};
use user_service_lib::{AccountManager, AccountService, Database, UserRepository, UserStore};

use crate::config::GatewayConfig;
use crate::middleware::RedisRateLimiter;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect to Postgres and Redis and wire up every service.
pub async fn build_state(config: GatewayConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;

    let client = redis::Client::open(config.redis.url.as_str())?;
    let redis = ConnectionManager::new(client).await?;
    info!("Redis connected");

    let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));
    let verifier = CredentialVerifier::new(Arc::new(UserDirectory::new(users.clone())));
    let auth = Authenticator::new(
        verifier,
        Arc::new(RedisSessionStore::new(redis.clone())),
        config.session.ttl_hours,
    );
    let accounts = AccountManager::new(users);
    let clock = SystemClock::with_offset_minutes(config.schedule_utc_offset_minutes);
    let schedules = ScheduleManager::new(
        Arc::new(ScheduleStore::new(db.get_connection())),
        Arc::new(clock),
    );

    Ok(AppState::new(
        Arc::new(auth),
        Arc::new(accounts),
        Arc::new(schedules),
        Arc::new(RedisRateLimiter::new(redis)),
        config,
    ))
}

/// Run the HTTP server with the given configuration.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = config.bind_address().parse()?;
    let state = build_state(config).await?;

    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create an account directly against the database.
pub async fn create_account(
    config: &GatewayConfig,
    request: CreateUser,
) -> Result<UserResponse, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let accounts = AccountManager::new(Arc::new(UserStore::new(db.get_connection())));

    let user = accounts.create_account(request).await?;
    Ok(UserResponse::from(user))
}
