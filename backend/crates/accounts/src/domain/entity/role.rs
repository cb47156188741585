//! Role Entity
//!
//! Plain data record. Authorization is a simple role-name check;
//! the `permissions` blob is stored and returned verbatim.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Role name every registered account starts with
pub const DEFAULT_ROLE: &str = "customer";

/// Role name allowed to mutate catalog data
pub const ADMIN_ROLE: &str = "admin";

/// Role entity
#[derive(Debug, Clone)]
pub struct Role {
    pub role_id: Uuid,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    /// Opaque permission payload, not interpreted by the backend
    pub permissions: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Build the default role assigned at registration
    pub fn default_customer() -> Self {
        let now = Utc::now();
        Self {
            role_id: Uuid::new_v4(),
            name: DEFAULT_ROLE.to_string(),
            display_name: "Customer".to_string(),
            description: None,
            permissions: serde_json::json!([]),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields accepted when creating or updating a role
#[derive(Debug, Clone)]
pub struct RoleChanges {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub permissions: serde_json::Value,
    pub is_active: bool,
}
