//! API DTOs (Data Transfer Objects)
//!
//! Wire field names are snake_case, matching the public API contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Account, Address, Role};

/// Request for POST /send-otp
#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpRequest {
    pub phone_number: String,
}

/// Response for POST /send-otp
///
/// `otp` is exposed here as a development stand-in for SMS delivery.
#[derive(Debug, Clone, Serialize)]
pub struct SendOtpResponse {
    pub otp: u32,
    pub issue_token: Uuid,
}

/// Request for POST /verify-otp
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp: u32,
    pub issue_token: Uuid,
}

/// Generic detail message response
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: &'static str,
}

/// Request for POST /register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub phone_number: String,
    pub issue_token: Uuid,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Request for POST /login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

/// Response for POST /login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub renewal_token: String,
    pub user: ProfileResponse,
}

/// Request for POST /token/refresh
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub renewal_token: String,
}

/// Response for POST /token/refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// Request for POST /logout
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    pub renewal_token: String,
}

/// Request for POST /reset-password
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub phone_number: String,
    pub issue_token: Uuid,
    pub new_password: String,
}

/// Request for POST /change-password
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Public profile projection (no credential material)
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub account_id: Uuid,
    pub phone_number: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            phone_number: account.phone_number.as_str().to_string(),
            email: account.email.as_ref().map(|e| e.as_str().to_string()),
            first_name: account.first_name.as_ref().map(|n| n.as_str().to_string()),
            last_name: account.last_name.as_ref().map(|n| n.as_str().to_string()),
            avatar_url: account.avatar_url.clone(),
        }
    }
}

/// Request for PUT /profile (absent fields stay unchanged)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Request body for role create/update
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRequest {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_permissions")]
    pub permissions: serde_json::Value,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_permissions() -> serde_json::Value {
    serde_json::json!([])
}

fn default_true() -> bool {
    true
}

/// Role projection
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub role_id: Uuid,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub permissions: serde_json::Value,
    pub is_active: bool,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            role_id: role.role_id,
            name: role.name,
            display_name: role.display_name,
            description: role.description,
            permissions: role.permissions,
            is_active: role.is_active,
        }
    }
}

/// Request body for address create/update
#[derive(Debug, Clone, Deserialize)]
pub struct AddressRequest {
    pub title: String,
    pub full_address: String,
    pub postal_code: String,
    pub city: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Address projection
#[derive(Debug, Clone, Serialize)]
pub struct AddressResponse {
    pub address_id: Uuid,
    pub title: String,
    pub full_address: String,
    pub postal_code: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            address_id: address.address_id,
            title: address.title,
            full_address: address.full_address,
            postal_code: address.postal_code,
            city: address.city,
            latitude: address.latitude,
            longitude: address.longitude,
        }
    }
}
