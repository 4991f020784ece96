//! Domain-level errors.
//!
//! Only faults the domain layer itself can detect live here. Access control
//! and lookup outcomes belong to the application error in `common`.

use thiserror::Error;

/// Errors raised by domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A new password does not meet the policy
    #[error("{0}")]
    Password(String),

    /// Stored data violates a domain invariant, e.g. an unknown role
    #[error("Data integrity fault: {0}")]
    DataIntegrity(String),

    /// Hashing backend failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        DomainError::DataIntegrity(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
