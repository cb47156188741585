//! Application Configuration

use std::time::Duration;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Minimum gap between OTP issues for the same phone number
    pub resend_cooldown: Duration,
    /// Challenge TTL (must exceed the resend cooldown)
    pub otp_ttl: Duration,
    /// Verified marker TTL
    pub marker_ttl: Duration,
    /// Access token TTL
    pub access_ttl: Duration,
    /// Renewal token TTL
    pub renewal_ttl: Duration,
    /// Secret key for HMAC token signing (32 bytes)
    pub token_secret: [u8; 32],
    /// Optional application-wide password pepper
    pub pepper: Option<Vec<u8>>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            resend_cooldown: Duration::from_secs(2 * 60),
            otp_ttl: Duration::from_secs(10 * 60),
            marker_ttl: Duration::from_secs(10 * 60),
            access_ttl: Duration::from_secs(15 * 60),
            renewal_ttl: Duration::from_secs(14 * 24 * 3600),
            token_secret: [0u8; 32],
            pepper: None,
        }
    }
}

impl AccountsConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
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

    pub fn resend_cooldown_ms(&self) -> i64 {
        self.resend_cooldown.as_millis() as i64
    }

    pub fn access_ttl_ms(&self) -> i64 {
        self.access_ttl.as_millis() as i64
    }

    pub fn renewal_ttl_ms(&self) -> i64 {
        self.renewal_ttl.as_millis() as i64
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.pepper.as_deref()
    }
}
