//! Current User Use Case
//!
//! Verifies a presented bearer credential and returns the authenticated
//! principal's claims. Stateless: only the signature and expiry are checked,
//! the Credential Store is never consulted.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::AccessClaims;
use crate::error::AuthResult;

/// Current user use case
pub struct CurrentUserUseCase {
    config: Arc<AuthConfig>,
}

impl CurrentUserUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Verify the credential and decode its claims
    pub fn execute(&self, bearer: &str) -> AuthResult<AccessClaims> {
        let claims = self.config.signer().verify::<AccessClaims>(bearer)?;
        Ok(claims)
    }
}
