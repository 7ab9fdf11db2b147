//! Bearer Token Signing and Verification
//!
//! Compact, time-bounded bearer credentials as HS256 JWTs. The signer is
//! generic over the claims shape; callers define their own claims struct and
//! get validation of signature and expiry here.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

/// Token signing/verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token could not be produced
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Signature mismatch, malformed token, or claims shape mismatch
    #[error("Token is invalid")]
    Invalid,

    /// Signature is fine but the expiry is in the past
    #[error("Token has expired")]
    Expired,
}

/// HS256 token signer bound to one secret.
///
/// Verification enforces both the signature and the `exp` claim; a token
/// that fails either never authorizes anything.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Create a signer from secret key material.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a claims value into a compact token string.
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and decode its claims.
    ///
    /// Checks the signature and the `exp` claim; expiry is reported
    /// distinctly so callers can log it, but both outcomes deny access.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        iat: i64,
        exp: i64,
    }

    fn claims_expiring_in(secs: i64) -> TestClaims {
        let now = chrono::Utc::now().timestamp();
        TestClaims {
            sub: "subject-1".to_string(),
            iat: now,
            exp: now + secs,
        }
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let signer = TokenSigner::new(b"test-secret-material");
        let claims = claims_expiring_in(3600);

        let token = signer.sign(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = signer.verify(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let signer = TokenSigner::new(b"test-secret-material");
        let result: Result<TestClaims, _> = signer.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer_a = TokenSigner::new(b"secret-a");
        let signer_b = TokenSigner::new(b"secret-b");

        let token = signer_a.sign(&claims_expiring_in(3600)).unwrap();
        let result: Result<TestClaims, _> = signer_b.verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = TokenSigner::new(b"test-secret-material");

        // Expired well past the default leeway
        let token = signer.sign(&claims_expiring_in(-300)).unwrap();
        let result: Result<TestClaims, _> = signer.verify(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = TokenSigner::new(b"test-secret-material");
        let token = signer.sign(&claims_expiring_in(3600)).unwrap();

        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        let result: Result<TestClaims, _> = signer.verify(&tampered);
        assert!(result.is_err());
    }
}
