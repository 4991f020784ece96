//! Access to the user store needed by authentication.

mod user_client;

pub use user_client::{CredentialStore, UserDirectory};

#[cfg(any(test, feature = "test-utils"))]
pub use user_client::MockCredentialStore;
