//! Credential verification.
//!
//! Every rejection (missing field, unknown account, wrong password) reaches
//! the caller as the same `AppError::InvalidCredentials`. Which case occurred
//! is only logged.

use std::fmt;
use std::sync::Arc;

use tracing::{error, warn};

use common::{AppError, AppResult};
use domain::{normalize_email, AuthenticatedIdentity, CredentialRecord, Password};

use crate::client::CredentialStore;

/// Internal reason a credential check was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Identifier or secret was empty
    MissingCredentials,
    /// No record for the normalized identifier
    UserNotFound,
    /// Secret did not match the stored hash
    InvalidSecret,
}

impl AuthFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailure::MissingCredentials => "missing_credentials",
            AuthFailure::UserNotFound => "user_not_found",
            AuthFailure::InvalidSecret => "invalid_secret",
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks a raw identifier/secret pair against the credential store.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn CredentialStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Verify raw login input.
    ///
    /// # Errors
    /// - `AppError::InvalidCredentials` for any rejected input
    /// - `AppError::Internal` if the store fails or the stored role is unknown
    pub async fn verify(
        &self,
        identifier_raw: &str,
        secret_raw: &str,
    ) -> AppResult<AuthenticatedIdentity> {
        match self.check(identifier_raw, secret_raw).await? {
            // DataIntegrity is logged once, by the AppError conversion
            Ok(record) => record.identity().map_err(AppError::from),
            Err(failure) => {
                warn!(reason = %failure, "Credential check rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Run the check, keeping the rejection reason.
    ///
    /// The outer result carries infrastructure failures only.
    pub async fn check(
        &self,
        identifier_raw: &str,
        secret_raw: &str,
    ) -> AppResult<Result<CredentialRecord, AuthFailure>> {
        let email = normalize_email(identifier_raw);
        if email.is_empty() || secret_raw.is_empty() {
            return Ok(Err(AuthFailure::MissingCredentials));
        }

        let record = self
            .store
            .find_by_normalized_email(&email)
            .await
            .map_err(|e| {
                error!(error = ?e, "Credential lookup failed");
                AppError::internal("credential lookup failed")
            })?;

        // Unknown accounts still pay for one hash comparison.
        let stored = match &record {
            Some(record) => Password::from_hash(record.password_hash.as_str()),
            None => Password::dummy(),
        };
        let secret = secret_raw.to_owned();
        let matches = tokio::task::spawn_blocking(move || stored.verify(&secret))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))?;

        Ok(match record {
            None => Err(AuthFailure::UserNotFound),
            Some(_) if !matches => Err(AuthFailure::InvalidSecret),
            Some(record) => Ok(record),
        })
    }
}
