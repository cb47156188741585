//! Account Entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_object::{Email, PersonName, PhoneNumber};

/// Account entity - a registered user identified by phone number
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: Uuid,
    pub role_id: Uuid,
    pub phone_number: PhoneNumber,
    pub email: Option<Email>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub avatar_url: Option<String>,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    pub is_active: bool,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert a new account
///
/// The role is resolved inside the registration transaction, so it is
/// not part of this struct.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account_id: Uuid,
    pub phone_number: PhoneNumber,
    pub email: Option<Email>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub password_hash: String,
}

impl NewAccount {
    pub fn new(
        phone_number: PhoneNumber,
        email: Option<Email>,
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
        password_hash: String,
    ) -> Self {
        Self {
            account_id: Uuid::new_v4(),
            phone_number,
            email,
            first_name,
            last_name,
            password_hash,
        }
    }
}

/// Profile fields an account holder may change
///
/// The phone number is the account's identity and is read-only.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<Email>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub avatar_url: Option<String>,
}

/// Authentication context loaded by the middleware
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub role_name: String,
    pub is_active: bool,
}
