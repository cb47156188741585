//! In-Memory Repository Implementations
//!
//! Backs the same traits as the Postgres repository with process-local
//! maps. The verification flow only sees the trait, so the store backend
//! can be swapped without touching the use cases; tests run the full
//! flows against this implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{
    Account, Address, AddressChanges, AuthContext, DEFAULT_ROLE, NewAccount, ProfileChanges, Role,
    RoleChanges,
};
use crate::domain::repository::{
    AccountRepository, AddressRepository, RoleRepository, TokenDenyListRepository,
    VerificationStore,
};
use crate::domain::value_object::PhoneNumber;
use crate::error::{AccountsError, AccountsResult};

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: serde_json::Value,
    expires_at_ms: i64,
}

impl CacheEntry {
    fn is_live(&self, now_ms: i64) -> bool {
        self.expires_at_ms > now_ms
    }
}

#[derive(Default)]
struct MemoryState {
    cache: HashMap<String, CacheEntry>,
    accounts: HashMap<Uuid, Account>,
    roles: HashMap<Uuid, Role>,
    addresses: HashMap<Uuid, Address>,
    revoked_tokens: HashMap<Uuid, Uuid>,
}

/// In-memory repository
#[derive(Clone, Default)]
pub struct MemoryAccountsRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryAccountsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn expires_at(ttl: Duration) -> i64 {
        Self::now_ms() + ttl.as_millis() as i64
    }

    #[cfg(test)]
    pub(crate) async fn set_active(&self, account_id: Uuid, is_active: bool) {
        let mut state = self.state.write().await;
        if let Some(account) = state.accounts.get_mut(&account_id) {
            account.is_active = is_active;
        }
    }
}

impl VerificationStore for MemoryAccountsRepository {
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> AccountsResult<()> {
        let mut state = self.state.write().await;
        state.cache.insert(
            key.to_string(),
            CacheEntry {
                payload: value,
                expires_at_ms: Self::expires_at(ttl),
            },
        );
        Ok(())
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> AccountsResult<bool> {
        let now_ms = Self::now_ms();
        let mut state = self.state.write().await;

        if let Some(entry) = state.cache.get(key) {
            if entry.is_live(now_ms) {
                return Ok(false);
            }
        }

        state.cache.insert(
            key.to_string(),
            CacheEntry {
                payload: value,
                expires_at_ms: now_ms + ttl.as_millis() as i64,
            },
        );
        Ok(true)
    }

    async fn get(&self, key: &str) -> AccountsResult<Option<serde_json::Value>> {
        let now_ms = Self::now_ms();
        let state = self.state.read().await;

        Ok(state
            .cache
            .get(key)
            .filter(|entry| entry.is_live(now_ms))
            .map(|entry| entry.payload.clone()))
    }

    async fn delete(&self, key: &str) -> AccountsResult<()> {
        let mut state = self.state.write().await;
        state.cache.remove(key);
        Ok(())
    }
}

impl AccountRepository for MemoryAccountsRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AccountsResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| &a.phone_number == phone)
            .cloned())
    }

    async fn find_by_id(&self, account_id: Uuid) -> AccountsResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&account_id).cloned())
    }

    async fn phone_exists(&self, phone: &PhoneNumber) -> AccountsResult<bool> {
        let state = self.state.read().await;
        Ok(state.accounts.values().any(|a| &a.phone_number == phone))
    }

    async fn register(&self, new_account: &NewAccount) -> AccountsResult<Account> {
        let mut state = self.state.write().await;

        if state
            .accounts
            .values()
            .any(|a| a.phone_number == new_account.phone_number)
        {
            return Err(AccountsError::PhoneAlreadyExists);
        }

        let role_id = match state.roles.values().find(|r| r.name == DEFAULT_ROLE) {
            Some(role) => role.role_id,
            None => {
                let role = Role::default_customer();
                let role_id = role.role_id;
                state.roles.insert(role_id, role);
                role_id
            }
        };

        let now = Utc::now();
        let account = Account {
            account_id: new_account.account_id,
            role_id,
            phone_number: new_account.phone_number.clone(),
            email: new_account.email.clone(),
            first_name: new_account.first_name.clone(),
            last_name: new_account.last_name.clone(),
            avatar_url: None,
            password_hash: new_account.password_hash.clone(),
            is_active: true,
            registered_at: now,
            updated_at: now,
        };

        state.accounts.insert(account.account_id, account.clone());
        Ok(account)
    }

    async fn update_password(&self, account_id: Uuid, password_hash: &str) -> AccountsResult<()> {
        let mut state = self.state.write().await;
        if let Some(account) = state.accounts.get_mut(&account_id) {
            account.password_hash = password_hash.to_string();
            account.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        account_id: Uuid,
        changes: &ProfileChanges,
    ) -> AccountsResult<Account> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&account_id)
            .ok_or(AccountsError::NotFound("Account"))?;

        if let Some(email) = &changes.email {
            account.email = Some(email.clone());
        }
        if let Some(first_name) = &changes.first_name {
            account.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            account.last_name = Some(last_name.clone());
        }
        if let Some(avatar_url) = &changes.avatar_url {
            account.avatar_url = Some(avatar_url.clone());
        }
        account.updated_at = Utc::now();

        Ok(account.clone())
    }

    async fn find_auth_context(&self, account_id: Uuid) -> AccountsResult<Option<AuthContext>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&account_id).map(|account| {
            let role_name = state
                .roles
                .get(&account.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string());
            AuthContext {
                account_id: account.account_id,
                role_name,
                is_active: account.is_active,
            }
        }))
    }
}

impl RoleRepository for MemoryAccountsRepository {
    async fn list_roles(&self) -> AccountsResult<Vec<Role>> {
        let state = self.state.read().await;
        let mut roles: Vec<Role> = state.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn find_role(&self, role_id: Uuid) -> AccountsResult<Option<Role>> {
        let state = self.state.read().await;
        Ok(state.roles.get(&role_id).cloned())
    }

    async fn create_role(&self, changes: &RoleChanges) -> AccountsResult<Role> {
        let mut state = self.state.write().await;

        if state.roles.values().any(|r| r.name == changes.name) {
            return Err(AccountsError::Validation {
                field: "name",
                message: "A role with this name already exists".to_string(),
            });
        }

        let now = Utc::now();
        let role = Role {
            role_id: Uuid::new_v4(),
            name: changes.name.clone(),
            display_name: changes.display_name.clone(),
            description: changes.description.clone(),
            permissions: changes.permissions.clone(),
            is_active: changes.is_active,
            created_at: now,
            updated_at: now,
        };

        state.roles.insert(role.role_id, role.clone());
        Ok(role)
    }

    async fn update_role(
        &self,
        role_id: Uuid,
        changes: &RoleChanges,
    ) -> AccountsResult<Option<Role>> {
        let mut state = self.state.write().await;
        let Some(role) = state.roles.get_mut(&role_id) else {
            return Ok(None);
        };

        role.name = changes.name.clone();
        role.display_name = changes.display_name.clone();
        role.description = changes.description.clone();
        role.permissions = changes.permissions.clone();
        role.is_active = changes.is_active;
        role.updated_at = Utc::now();

        Ok(Some(role.clone()))
    }

    async fn delete_role(&self, role_id: Uuid) -> AccountsResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.roles.remove(&role_id).is_some())
    }
}

impl AddressRepository for MemoryAccountsRepository {
    async fn list_addresses(&self, account_id: Uuid) -> AccountsResult<Vec<Address>> {
        let state = self.state.read().await;
        let mut addresses: Vec<Address> = state
            .addresses
            .values()
            .filter(|a| a.account_id == account_id)
            .cloned()
            .collect();
        addresses.sort_by_key(|a| a.created_at);
        Ok(addresses)
    }

    async fn find_address(
        &self,
        address_id: Uuid,
        account_id: Uuid,
    ) -> AccountsResult<Option<Address>> {
        let state = self.state.read().await;
        Ok(state
            .addresses
            .get(&address_id)
            .filter(|a| a.account_id == account_id)
            .cloned())
    }

    async fn create_address(
        &self,
        account_id: Uuid,
        changes: &AddressChanges,
    ) -> AccountsResult<Address> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let address = Address {
            address_id: Uuid::new_v4(),
            account_id,
            title: changes.title.clone(),
            full_address: changes.full_address.clone(),
            postal_code: changes.postal_code.clone(),
            city: changes.city.clone(),
            latitude: changes.latitude,
            longitude: changes.longitude,
            created_at: now,
            updated_at: now,
        };

        state.addresses.insert(address.address_id, address.clone());
        Ok(address)
    }

    async fn update_address(
        &self,
        address_id: Uuid,
        account_id: Uuid,
        changes: &AddressChanges,
    ) -> AccountsResult<Option<Address>> {
        let mut state = self.state.write().await;
        let Some(address) = state
            .addresses
            .get_mut(&address_id)
            .filter(|a| a.account_id == account_id)
        else {
            return Ok(None);
        };

        address.title = changes.title.clone();
        address.full_address = changes.full_address.clone();
        address.postal_code = changes.postal_code.clone();
        address.city = changes.city.clone();
        address.latitude = changes.latitude;
        address.longitude = changes.longitude;
        address.updated_at = Utc::now();

        Ok(Some(address.clone()))
    }

    async fn delete_address(&self, address_id: Uuid, account_id: Uuid) -> AccountsResult<bool> {
        let mut state = self.state.write().await;
        let owned = state
            .addresses
            .get(&address_id)
            .is_some_and(|a| a.account_id == account_id);
        if owned {
            state.addresses.remove(&address_id);
        }
        Ok(owned)
    }
}

impl TokenDenyListRepository for MemoryAccountsRepository {
    async fn revoke(&self, token_id: Uuid, account_id: Uuid) -> AccountsResult<bool> {
        let mut state = self.state.write().await;
        if state.revoked_tokens.contains_key(&token_id) {
            return Ok(false);
        }
        state.revoked_tokens.insert(token_id, account_id);
        Ok(true)
    }

    async fn is_revoked(&self, token_id: Uuid) -> AccountsResult<bool> {
        let state = self.state.read().await;
        Ok(state.revoked_tokens.contains_key(&token_id))
    }
}
