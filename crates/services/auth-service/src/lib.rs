//! Auth Service Library
//!
//! Credential verification against the user store and session issuance on
//! top of Redis.

pub mod client;
pub mod service;
pub mod session;

pub use client::{CredentialStore, UserDirectory};
pub use service::{AuthFailure, AuthService, Authenticator, CredentialVerifier, LoginResponse};
pub use session::{RedisSessionStore, Session, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockCredentialStore;
#[cfg(any(test, feature = "test-utils"))]
pub use session::MockSessionStore;
