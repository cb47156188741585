//! Phone Number Value Object
//!
//! Canonical mobile phone number: exactly 11 ASCII digits starting with
//! `09`. This string is also the key under which verification challenges
//! are stored, so normalization happens here and nowhere else.

use crate::error::{AccountsError, AccountsResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Validated mobile phone number (09XXXXXXXXX)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new phone number with validation
    pub fn new(raw: impl Into<String>) -> AccountsResult<Self> {
        let phone = raw.into().trim().to_string();

        if phone.len() != 11
            || !phone.starts_with("09")
            || !phone.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AccountsError::InvalidPhoneFormat);
        }

        Ok(Self(phone))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    /// Get the phone number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for PhoneNumber {
    type Err = AccountsError;

    fn from_str(s: &str) -> AccountsResult<Self> {
        PhoneNumber::new(s)
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        assert!(PhoneNumber::new("09123456789").is_ok());
        assert!(PhoneNumber::new("09000000000").is_ok());
        // Surrounding whitespace is trimmed
        assert_eq!(
            PhoneNumber::new(" 09123456789 ").unwrap().as_str(),
            "09123456789"
        );
    }

    #[test]
    fn test_phone_invalid() {
        // Wrong prefix
        assert!(PhoneNumber::new("08123456789").is_err());
        assert!(PhoneNumber::new("19123456789").is_err());
        // Wrong length
        assert!(PhoneNumber::new("0912345678").is_err());
        assert!(PhoneNumber::new("091234567890").is_err());
        // Non-digits
        assert!(PhoneNumber::new("0912345678a").is_err());
        assert!(PhoneNumber::new("+9123456789").is_err());
        assert!(PhoneNumber::new("").is_err());
    }
}
