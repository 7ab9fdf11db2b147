//! Client Session Cache
//!
//! Rendering-side holder of the currently known user, kept to avoid
//! redundant profile fetches. Display-only: it never holds a password hash
//! and its lifetime is bounded to the client session.
//!
//! Consumers receive the cache through a [`SessionHandle`] installed by
//! whatever owns the rendering tree (explicit dependency injection, no
//! ambient global). Reading a handle before a cache is attached fails fast
//! with a descriptive error rather than returning an empty session.

use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::domain::value_object::email::Email;

/// Session cache errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Supplied user data failed shape validation
    #[error("Invalid session user: {0}")]
    InvalidShape(String),

    /// Handle used before a provider attached a cache
    #[error("Session cache accessed before a provider was installed")]
    ProviderMissing,
}

/// Display-only projection of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl SessionUser {
    /// Validate the shape: non-empty id and username, well-formed email
    fn validate(&self) -> Result<(), SessionError> {
        if self.id.trim().is_empty() {
            return Err(SessionError::InvalidShape("id cannot be empty".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(SessionError::InvalidShape(
                "username cannot be empty".to_string(),
            ));
        }
        Email::new(&self.email)
            .map_err(|e| SessionError::InvalidShape(e.message().to_string()))?;
        Ok(())
    }
}

/// Holder of the current identity
#[derive(Debug, Default)]
pub struct SessionCache {
    user: RwLock<Option<SessionUser>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a signed-in user after shape validation.
    ///
    /// Malformed data is rejected with an error and nothing is stored; the
    /// previously held identity (if any) is left untouched.
    pub fn login(&self, user: SessionUser) -> Result<(), SessionError> {
        user.validate()?;

        let mut slot = self.user.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(user);
        Ok(())
    }

    /// Clear the held identity
    pub fn logout(&self) {
        let mut slot = self.user.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// The currently known user, if any
    pub fn current(&self) -> Option<SessionUser> {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Handle passed to consumers of the session cache.
///
/// Starts detached; the owning scope attaches a cache before handing the
/// handle out. Access through a detached handle is a programming error and
/// fails fast.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    cache: Option<Arc<SessionCache>>,
}

impl SessionHandle {
    /// A handle with no cache attached
    pub fn detached() -> Self {
        Self::default()
    }

    /// A handle bound to the given cache
    pub fn attached(cache: Arc<SessionCache>) -> Self {
        Self { cache: Some(cache) }
    }

    /// Access the cache, failing fast if no provider installed one
    pub fn get(&self) -> Result<&SessionCache, SessionError> {
        self.cache
            .as_deref()
            .ok_or(SessionError::ProviderMissing)
    }
}
