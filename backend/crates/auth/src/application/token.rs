//! Access Token Claims
//!
//! The claim set carried by a bearer credential. Minted once per successful
//! login, stored client-side, never tracked server-side.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Claims asserted by a bearer credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the user's ID
    pub sub: String,
    /// Account email at issue time
    pub email: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

impl AccessClaims {
    /// Mint claims for a user with the given lifetime
    pub fn new(user: &User, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user.user_id.to_string(),
            email: user.email.as_str().to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }

    /// Parse the subject claim back into a typed user ID.
    ///
    /// A subject that does not parse means a token this service never
    /// minted; reported as an invalid token, not a server error.
    pub fn subject_id(&self) -> AuthResult<UserId> {
        UserId::parse_str(&self.sub).map_err(|_| AuthError::TokenInvalid)
    }

    /// Check expiry without going through the signer
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email,
        user_password::{RawPassword, UserPassword},
    };

    fn test_user() -> User {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        User::new(
            Email::new("a@x.com").unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
            None,
            None,
        )
    }

    #[test]
    fn test_claims_carry_subject_and_email() {
        let user = test_user();
        let claims = AccessClaims::new(&user, Duration::from_secs(3600));

        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_subject_id_roundtrip() {
        let user = test_user();
        let claims = AccessClaims::new(&user, Duration::from_secs(3600));

        assert_eq!(claims.subject_id().unwrap(), user.user_id);
    }

    #[test]
    fn test_malformed_subject_rejected() {
        let claims = AccessClaims {
            sub: "not-a-uuid".to_string(),
            email: "a@x.com".to_string(),
            iat: 0,
            exp: i64::MAX,
        };

        assert!(matches!(
            claims.subject_id(),
            Err(AuthError::TokenInvalid)
        ));
    }
}
