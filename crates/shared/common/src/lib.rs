//! Common utilities shared across the workspace.
//!
//! - `AppError`, the error every service returns and the gateway renders
//! - environment-driven configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
