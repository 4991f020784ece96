//! User Service Library
//!
//! Owns the `users` table: account lookup for authentication and account
//! creation with normalized, unique email addresses.

pub mod infra;
pub mod repository;
pub mod service;

pub use infra::Database;
pub use repository::{NewUser, UserRepository, UserStore};
pub use service::{AccountManager, AccountService};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockUserRepository;
