//! Ephemeral Verification Records
//!
//! Short-lived records kept in the verification store, keyed by phone
//! number. Two namespaces share the store:
//! - `<phone>` holds the live OTP challenge
//! - `verified_<phone>` marks a phone number as verified

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::PhoneNumber;

/// OTP range: six decimal digits
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

/// Store key for the OTP challenge of a phone number
pub fn challenge_key(phone: &PhoneNumber) -> String {
    phone.as_str().to_string()
}

/// Store key for the verified marker of a phone number
pub fn marker_key(phone: &PhoneNumber) -> String {
    format!("verified_{}", phone.as_str())
}

/// A pending OTP challenge
///
/// A successful verification does not delete the challenge; it lives
/// until registration cleanup or TTL expiry. Re-verification attempts
/// are cut off by the marker check, so the surviving record is inert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationChallenge {
    pub otp: u32,
    pub issue_token: Uuid,
    pub created_at: DateTime<Utc>,
}

impl VerificationChallenge {
    /// Create a fresh challenge with the given OTP and a random issue token
    pub fn new(otp: u32) -> Self {
        Self {
            otp,
            issue_token: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    /// Milliseconds since this challenge was issued
    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp_millis() - self.created_at.timestamp_millis()
    }
}

/// Marker proving a phone number passed OTP verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedMarker {
    pub issue_token: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_keys() {
        let phone = PhoneNumber::new("09123456789").unwrap();
        assert_eq!(challenge_key(&phone), "09123456789");
        assert_eq!(marker_key(&phone), "verified_09123456789");
    }

    #[test]
    fn test_challenge_age() {
        let challenge = VerificationChallenge::new(123_456);
        let later = challenge.created_at + chrono::Duration::milliseconds(5_000);
        assert_eq!(challenge.age_ms(later), 5_000);
    }

    #[test]
    fn test_challenge_serde_roundtrip() {
        let challenge = VerificationChallenge::new(654_321);
        let json = serde_json::to_value(&challenge).unwrap();
        let back: VerificationChallenge = serde_json::from_value(json).unwrap();
        assert_eq!(back, challenge);
    }
}
