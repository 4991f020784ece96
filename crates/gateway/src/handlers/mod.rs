//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod health_handler;
pub mod schedule_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::{login_routes, session_routes};
pub use health_handler::health_routes;
pub use schedule_handler::schedule_routes;
