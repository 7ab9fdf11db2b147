//! Update Profile Use Case
//!
//! Applies a partial profile patch for the authenticated subject.

use std::sync::Arc;

use crate::domain::entity::user::{ProfilePatch, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Apply `patch` to the record identified by `subject`.
    ///
    /// `subject` always comes from a verified token's subject claim, never
    /// from client-supplied identity. An absent subject signals a stale or
    /// forged token and surfaces as `SubjectNotFound` (401); which case
    /// occurred is deliberately not leaked.
    pub async fn execute(&self, subject: &UserId, patch: ProfilePatch) -> AuthResult<User> {
        let mut user = self
            .repo
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::SubjectNotFound)?;

        user.apply_patch(&patch);

        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(user)
    }
}
