//! Application Configuration
//!
//! Configuration for the Auth application layer. The signing secret and the
//! token lifetime are the only tunables; both come from the environment in
//! production, never from literals in the code.

use platform::token::TokenSigner;
use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key material for signing bearer credentials
    pub token_secret: Vec<u8>,
    /// Bearer credential lifetime (60 minutes unless configured otherwise)
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Token lifetime in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }

    /// Build a signer bound to this config's secret
    pub fn signer(&self) -> TokenSigner {
        TokenSigner::new(&self.token_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_sixty_minutes() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.token_ttl_secs(), 3600);
    }

    #[test]
    fn test_with_random_secret() {
        let config1 = AuthConfig::with_random_secret();
        let config2 = AuthConfig::with_random_secret();

        assert_ne!(config1.token_secret, config2.token_secret);
        assert!(config1.token_secret.iter().any(|&b| b != 0));
    }
}
