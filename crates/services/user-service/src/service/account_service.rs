//! Account service - account creation and listing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use common::{AppError, AppResult};
use domain::{normalize_email, CreateUser, Password, User, MIN_NAME_LENGTH};

use crate::repository::{NewUser, UserRepository};

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. The email is normalized and must be unique in that form.
    async fn create_account(&self, request: CreateUser) -> AppResult<User>;

    /// List every account
    async fn list_accounts(&self) -> AppResult<Vec<User>>;

    /// Check the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of AccountService using repository.
pub struct AccountManager {
    repo: Arc<dyn UserRepository>,
}

impl AccountManager {
    /// Create new account service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn create_account(&self, request: CreateUser) -> AppResult<User> {
        let email = normalize_email(&request.email);
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }

        let name = request.name.trim().to_string();
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(AppError::validation("Name is required"));
        }

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        // Argon2 is CPU-bound; keep it off the async workers.
        let plain = request.password;
        let password = tokio::task::spawn_blocking(move || Password::new(&plain))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??;

        let user = self
            .repo
            .create(NewUser {
                email,
                password_hash: password.into_string(),
                name,
                role: request.role,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "Account created");
        Ok(user)
    }

    async fn list_accounts(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn ping(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
