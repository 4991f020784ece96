//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! roles, credential records, password hashing, and the weekly schedule
//! window shared by every dashboard.

pub mod clock;
pub mod constants;
pub mod credential;
pub mod error;
pub mod password;
pub mod user;
pub mod week;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use credential::{normalize_email, AuthenticatedIdentity, CredentialRecord};
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{CreateUser, Role, User, UserResponse};
pub use week::{compute_week, parse_week_offset, WeekWindow};
