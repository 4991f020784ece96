//! Authentication business logic.

mod auth_service;
mod verifier;

pub use auth_service::{AuthService, Authenticator, LoginResponse};
pub use verifier::{AuthFailure, CredentialVerifier};
