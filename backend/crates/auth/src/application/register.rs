//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        // Validate input shape
        let email = Email::new(&input.email)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        // Fast-path duplicate check; the store's insert enforces the same
        // invariant atomically, so a concurrent registration still loses
        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Argon2id is deliberately expensive, keep it off the async workers
        let password_hash = tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(|e| AuthError::Internal(e.message().to_string()))?;

        let user = User::new(email, password_hash, input.display_name, input.avatar_url);

        self.repo.insert(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(user)
    }
}
