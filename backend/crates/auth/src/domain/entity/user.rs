//! User Entity
//!
//! Canonical account record. The Credential Store owns the only live copy;
//! everything that leaves the trust boundary is a projection without the
//! password hash.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword, user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier, assigned at creation, immutable
    pub user_id: UserId,
    /// Unique lookup key; no two live records share an email
    pub email: Email,
    /// Argon2id hash, never the raw password
    pub password_hash: UserPassword,
    /// Display name (mutable profile field)
    pub display_name: Option<String>,
    /// Avatar reference (mutable profile field)
    pub avatar_url: Option<String>,
    /// Capability tag, defaults to `user`
    pub role: UserRole,
    /// Verification flag; no verification workflow exists yet
    pub is_verified: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        email: Email,
        password_hash: UserPassword,
        display_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            display_name,
            avatar_url,
            role: UserRole::default(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial profile update.
    ///
    /// Shallow-merge semantics: absent fields are untouched, provided fields
    /// overwrite unconditionally (an empty string overwrites too). Refreshes
    /// `updated_at`.
    pub fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.display_name {
            self.display_name = Some(name.clone());
        }
        if let Some(avatar) = &patch.avatar_url {
            self.avatar_url = Some(avatar.clone());
        }
        self.updated_at = Utc::now();
    }
}

/// Partial profile update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfilePatch {
    /// True when the patch carries no fields
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.avatar_url.is_none()
    }
}
