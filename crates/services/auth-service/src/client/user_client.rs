//! Credential lookup backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use common::AppResult;
use domain::CredentialRecord;
use user_service_lib::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Lookup needed by the credential verifier.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the credential record for an already-normalized email
    async fn find_by_normalized_email(&self, email: &str) -> AppResult<Option<CredentialRecord>>;
}

/// [`CredentialStore`] over the user repository.
pub struct UserDirectory {
    repo: Arc<dyn UserRepository>,
}

impl UserDirectory {
    /// Wrap a user repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CredentialStore for UserDirectory {
    async fn find_by_normalized_email(&self, email: &str) -> AppResult<Option<CredentialRecord>> {
        debug!("Looking up credentials");
        self.repo.find_credentials(email).await
    }
}
