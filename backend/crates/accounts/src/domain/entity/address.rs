//! Address Entity
//!
//! Plain data record owned by an account.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Delivery address
#[derive(Debug, Clone)]
pub struct Address {
    pub address_id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub full_address: String,
    pub postal_code: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating an address
#[derive(Debug, Clone)]
pub struct AddressChanges {
    pub title: String,
    pub full_address: String,
    pub postal_code: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
