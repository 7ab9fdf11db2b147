//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! The acceptance policy is deliberately permissive: any non-empty password
//! without control characters is accepted, up to a length cap that protects
//! the hasher. Unicode input is NFKC-normalized before hashing so visually
//! identical passwords typed on different platforms verify consistently.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Maximum password length in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// PHC string verified when no account matches a login attempt, so the
/// absent-account path costs the same as a real verification. Standard
/// Argon2id parameters (m=19456, t=2, p=1); never matches a real password.
const PLACEHOLDER_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0c0kyUM6HZ1rTJ04CYRj0B1E";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty or contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Securely erased from memory when dropped. Does not implement `Clone`
/// to prevent accidental copies; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Accepts anything non-empty up to [`MAX_PASSWORD_LENGTH`] code points,
    /// rejecting control characters. Unicode is NFKC-normalized first.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points, not bytes
        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters (except space, tab, newline) are never legitimate
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// Generates a fresh random salt per call and returns a PHC-formatted
    /// hash string wrapped in [`HashedPassword`].
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        // 128-bit random salt
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries the algorithm identifier, version, parameters,
/// salt, and digest, so verification needs no out-of-band data.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// A throwaway hash for timing-equalized verification.
    ///
    /// Verify against this when the looked-up account does not exist; the
    /// call performs a full Argon2id computation and always fails.
    pub fn placeholder() -> Self {
        Self {
            hash: PLACEHOLDER_PHC.to_string(),
        }
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Argon2 uses constant-time comparison internally.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_accepts_short_passwords() {
        // No minimum length is enforced
        assert!(ClearTextPassword::new("secret1".to_string()).is_ok());
        assert!(ClearTextPassword::new("a".to_string()).is_ok());
    }

    #[test]
    fn test_policy_rejects_empty() {
        assert!(ClearTextPassword::new("".to_string()).is_err());
        assert!(ClearTextPassword::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_policy_rejects_too_long() {
        let long = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(matches!(
            ClearTextPassword::new(long),
            Err(PasswordPolicyError::TooLong { .. })
        ));

        let at_limit = "a".repeat(MAX_PASSWORD_LENGTH);
        assert!(ClearTextPassword::new(at_limit).is_ok());
    }

    #[test]
    fn test_policy_rejects_control_characters() {
        assert!(matches!(
            ClearTextPassword::new("pass\u{0000}word".to_string()),
            Err(PasswordPolicyError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        assert!(hashed.verify(&password));

        let wrong = ClearTextPassword::new("incorrect horse".to_string()).unwrap();
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = ClearTextPassword::new("same password".to_string()).unwrap();
        let h1 = password.hash().unwrap();
        let h2 = password.hash().unwrap();
        assert_ne!(h1.as_phc_string(), h2.as_phc_string());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("roundtrip me".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        let phc = hashed.as_phc_string().to_string();
        let restored = HashedPassword::from_phc_string(phc).unwrap();

        assert!(restored.verify(&password));
    }

    #[test]
    fn test_invalid_phc_string_rejected() {
        assert!(HashedPassword::from_phc_string("not a phc string").is_err());
    }

    #[test]
    fn test_placeholder_parses_and_never_matches() {
        let placeholder = HashedPassword::placeholder();
        // Must be a structurally valid PHC string so verification runs the
        // full Argon2id computation instead of failing fast on parse
        assert!(PasswordHash::new(placeholder.as_phc_string()).is_ok());

        let password = ClearTextPassword::new("anything at all".to_string()).unwrap();
        assert!(!placeholder.verify(&password));
    }

    #[test]
    fn test_unicode_normalization() {
        // NFKC folds compatibility forms; both spellings must verify
        let composed = ClearTextPassword::new("pa\u{00DF}wort!".to_string()).unwrap();
        let hashed = composed.hash().unwrap();
        let again = ClearTextPassword::new("pa\u{00DF}wort!".to_string()).unwrap();
        assert!(hashed.verify(&again));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("SuperSecret!".to_string()).unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("SuperSecret"));

        let hashed = password.hash().unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("HASH"));
    }
}
