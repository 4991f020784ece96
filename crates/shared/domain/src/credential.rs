//! Credential records and authenticated identities.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::user::Role;

/// Normalize an email identifier for lookup and storage.
///
/// Lookup and account creation must both go through this function; records
/// are unique on the normalized form only.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Stored credential row, read-only to the verifier.
///
/// `role` is the raw stored value; it becomes a [`Role`] only through
/// [`CredentialRecord::identity`].
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl CredentialRecord {
    /// Build the identity handed to session issuance.
    ///
    /// # Errors
    /// Returns `DomainError::DataIntegrity` if the stored role is not one of
    /// the known roles.
    pub fn identity(&self) -> DomainResult<AuthenticatedIdentity> {
        Ok(AuthenticatedIdentity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.parse()?,
        })
    }
}

/// Identity produced by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthenticatedIdentity {
    /// Numeric user id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Normalized email
    pub email: String,
    /// Access level
    pub role: Role,
}
