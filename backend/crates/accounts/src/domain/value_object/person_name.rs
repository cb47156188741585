//! Person Name Value Object

use crate::error::{AccountsError, AccountsResult};
use serde::{Deserialize, Serialize};

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 30;

/// First or last name, 2 to 30 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    /// Create a new name with validation
    ///
    /// `field` names the request field for error scoping
    /// ("first_name" or "last_name").
    pub fn new(raw: impl Into<String>, field: &'static str) -> AccountsResult<Self> {
        let name = raw.into().trim().to_string();
        let char_count = name.chars().count();

        if char_count < NAME_MIN_LENGTH || char_count > NAME_MAX_LENGTH {
            return Err(AccountsError::Validation {
                field,
                message: format!(
                    "Must be between {} and {} characters",
                    NAME_MIN_LENGTH, NAME_MAX_LENGTH
                ),
            });
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(PersonName::new("A", "first_name").is_err());
        assert!(PersonName::new("Al", "first_name").is_ok());
        assert!(PersonName::new("a".repeat(30), "first_name").is_ok());
        assert!(PersonName::new("a".repeat(31), "first_name").is_err());
    }

    #[test]
    fn test_name_trimmed() {
        let name = PersonName::new("  Reza  ", "first_name").unwrap();
        assert_eq!(name.as_str(), "Reza");
    }

    #[test]
    fn test_error_carries_field() {
        let err = PersonName::new("x", "last_name").unwrap_err();
        assert_eq!(err.field(), Some("last_name"));
    }
}
