//! Login Use Case
//!
//! Authenticates a user and mints a bearer credential.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::AccessClaims;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer credential
    pub access_token: String,
}

/// Login use case
///
/// Every failure surfaces as the same `InvalidCredentials` error: an unknown
/// account and a wrong password must not be distinguishable by message or by
/// timing, or the endpoint becomes an account-enumeration oracle.
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.repo.find_by_email(&email).await?;

        // When no account matches, verify against a placeholder hash so the
        // absent-account path burns the same Argon2id work
        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(UserPassword::placeholder);

        let verified = tokio::task::spawn_blocking(move || hash.verify(&raw_password))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))?;

        let user = match (user, verified) {
            (Some(user), true) => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        // Mint the bearer credential
        let claims = AccessClaims::new(&user, self.config.token_ttl);
        let access_token = self.config.signer().sign(&claims)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { access_token })
    }
}
