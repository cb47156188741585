//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer (`infra::postgres` for production,
//! `infra::memory` for tests).

use std::time::Duration;

use uuid::Uuid;

use crate::domain::entity::{
    Account, Address, AddressChanges, AuthContext, NewAccount, ProfileChanges, Role, RoleChanges,
};
use crate::domain::value_object::PhoneNumber;
use crate::error::AccountsResult;

/// Ephemeral key-value store for verification challenges and markers
///
/// The store is the only shared mutable state in the verification flow.
/// TTL handling is the store's responsibility: expired entries behave as
/// absent. Deleting an absent key is a no-op.
#[trait_variant::make(VerificationStore: Send)]
pub trait LocalVerificationStore {
    /// Write a value, replacing any existing entry
    async fn set(&self, key: &str, value: serde_json::Value, ttl: Duration)
    -> AccountsResult<()>;

    /// Write a value only if the key is absent (atomic check-and-set)
    ///
    /// Returns true if the value was written, false if a live entry
    /// already existed.
    async fn set_if_absent(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> AccountsResult<bool>;

    /// Read a live value
    async fn get(&self, key: &str) -> AccountsResult<Option<serde_json::Value>>;

    /// Delete a key (idempotent)
    async fn delete(&self, key: &str) -> AccountsResult<()>;
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AccountsResult<Option<Account>>;

    async fn find_by_id(&self, account_id: Uuid) -> AccountsResult<Option<Account>>;

    async fn phone_exists(&self, phone: &PhoneNumber) -> AccountsResult<bool>;

    /// Insert the account in a single transaction, get-or-creating the
    /// default customer role inside it
    async fn register(&self, new_account: &NewAccount) -> AccountsResult<Account>;

    async fn update_password(&self, account_id: Uuid, password_hash: &str) -> AccountsResult<()>;

    async fn update_profile(
        &self,
        account_id: Uuid,
        changes: &ProfileChanges,
    ) -> AccountsResult<Account>;

    /// Load the account id, role name, and active flag for authentication
    async fn find_auth_context(&self, account_id: Uuid) -> AccountsResult<Option<AuthContext>>;
}

/// Role repository trait
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn list_roles(&self) -> AccountsResult<Vec<Role>>;

    async fn find_role(&self, role_id: Uuid) -> AccountsResult<Option<Role>>;

    async fn create_role(&self, changes: &RoleChanges) -> AccountsResult<Role>;

    /// Returns None if the role does not exist
    async fn update_role(
        &self,
        role_id: Uuid,
        changes: &RoleChanges,
    ) -> AccountsResult<Option<Role>>;

    /// Returns false if the role did not exist
    async fn delete_role(&self, role_id: Uuid) -> AccountsResult<bool>;
}

/// Address repository trait (records are scoped to their owner)
#[trait_variant::make(AddressRepository: Send)]
pub trait LocalAddressRepository {
    async fn list_addresses(&self, account_id: Uuid) -> AccountsResult<Vec<Address>>;

    async fn find_address(
        &self,
        address_id: Uuid,
        account_id: Uuid,
    ) -> AccountsResult<Option<Address>>;

    async fn create_address(
        &self,
        account_id: Uuid,
        changes: &AddressChanges,
    ) -> AccountsResult<Address>;

    async fn update_address(
        &self,
        address_id: Uuid,
        account_id: Uuid,
        changes: &AddressChanges,
    ) -> AccountsResult<Option<Address>>;

    async fn delete_address(&self, address_id: Uuid, account_id: Uuid) -> AccountsResult<bool>;
}

/// Deny-list of revoked renewal token ids
#[trait_variant::make(TokenDenyListRepository: Send)]
pub trait LocalTokenDenyListRepository {
    /// Add a token id to the deny-list
    ///
    /// Returns true if the token was newly revoked, false if it was
    /// already on the list. Revocation is irreversible.
    async fn revoke(&self, token_id: Uuid, account_id: Uuid) -> AccountsResult<bool>;

    /// Check whether a token id has been revoked
    async fn is_revoked(&self, token_id: Uuid) -> AccountsResult<bool>;
}
