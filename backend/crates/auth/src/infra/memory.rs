//! In-Memory Repository Implementation
//!
//! Process-lifetime Credential Store: everything is gone on restart. Backs
//! tests and secretless development runs.
//!
//! A single `RwLock` guards the whole collection. The uniqueness check in
//! `insert` and the replacement in `update` each run under one write guard,
//! so concurrent registrations with the same email or concurrent updates for
//! the same subject cannot interleave into a duplicated or corrupted record.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (test helper)
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        // Uniqueness enforced under the same write guard as the append
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.user_id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        let slot = users
            .iter_mut()
            .find(|u| u.user_id == user.user_id)
            .ok_or(AuthError::SubjectNotFound)?;

        *slot = user.clone();
        Ok(())
    }
}
