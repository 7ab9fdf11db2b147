//! Repository Traits
//!
//! Interface for the Credential Store. Implementations live in the
//! infrastructure layer; an in-memory store backs tests and secretless
//! development, PostgreSQL backs production.
//!
//! Implementations must make `insert` atomic with respect to the email
//! uniqueness check, and `update` a single atomic replacement, so concurrent
//! registrations or profile updates never interleave into a corrupted or
//! duplicated record.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. Fails with `EmailTaken` if the email is in use.
    async fn insert(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Replace the stored record for the user's ID
    async fn update(&self, user: &User) -> AuthResult<()>;
}
