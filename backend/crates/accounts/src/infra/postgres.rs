//! PostgreSQL Repository Implementations

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    Account, Address, AddressChanges, AuthContext, DEFAULT_ROLE, NewAccount, ProfileChanges, Role,
    RoleChanges,
};
use crate::domain::repository::{
    AccountRepository, AddressRepository, RoleRepository, TokenDenyListRepository,
    VerificationStore,
};
use crate::domain::value_object::{Email, PersonName, PhoneNumber};
use crate::error::{AccountsError, AccountsResult};

// Deny-list rows older than this cannot belong to a live renewal token
const DENY_LIST_WINDOW_MS: i64 = 14 * 24 * 3600 * 1000;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired data
    pub async fn cleanup_expired(&self) -> AccountsResult<(u64, u64)> {
        let now_ms = Utc::now().timestamp_millis();

        let cache_deleted = sqlx::query("DELETE FROM verification_cache WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        let deny_list_deleted = sqlx::query(
            "DELETE FROM revoked_renewal_tokens WHERE revoked_at < now() - ($1 * interval '1 millisecond')",
        )
        .bind(DENY_LIST_WINDOW_MS)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(
            cache_entries = cache_deleted,
            deny_list_entries = deny_list_deleted,
            "Cleaned up expired accounts data"
        );

        Ok((cache_deleted, deny_list_deleted))
    }
}

impl VerificationStore for PgAccountsRepository {
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> AccountsResult<()> {
        let expires_at_ms = Utc::now().timestamp_millis() + ttl.as_millis() as i64;

        sqlx::query(
            r#"
            INSERT INTO verification_cache (cache_key, payload, expires_at_ms)
            VALUES ($1, $2, $3)
            ON CONFLICT (cache_key)
            DO UPDATE SET payload = EXCLUDED.payload,
                          expires_at_ms = EXCLUDED.expires_at_ms,
                          created_at = now()
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> AccountsResult<bool> {
        let now_ms = Utc::now().timestamp_millis();
        let expires_at_ms = now_ms + ttl.as_millis() as i64;

        // An expired row does not count as present; the conditional
        // upsert reclaims it in the same statement
        let row = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO verification_cache (cache_key, payload, expires_at_ms)
            VALUES ($1, $2, $3)
            ON CONFLICT (cache_key)
            DO UPDATE SET payload = EXCLUDED.payload,
                          expires_at_ms = EXCLUDED.expires_at_ms,
                          created_at = now()
            WHERE verification_cache.expires_at_ms <= $4
            RETURNING cache_key
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(expires_at_ms)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn get(&self, key: &str) -> AccountsResult<Option<serde_json::Value>> {
        let now_ms = Utc::now().timestamp_millis();

        let payload = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT payload FROM verification_cache WHERE cache_key = $1 AND expires_at_ms > $2",
        )
        .bind(key)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payload)
    }

    async fn delete(&self, key: &str) -> AccountsResult<()> {
        sqlx::query("DELETE FROM verification_cache WHERE cache_key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl AccountRepository for PgAccountsRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AccountsResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_id, role_id, phone_number, email, first_name, last_name,
                   avatar_url, password_hash, is_active, registered_at, updated_at
            FROM accounts
            WHERE phone_number = $1
            "#,
        )
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_id(&self, account_id: Uuid) -> AccountsResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_id, role_id, phone_number, email, first_name, last_name,
                   avatar_url, password_hash, is_active, registered_at, updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn phone_exists(&self, phone: &PhoneNumber) -> AccountsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE phone_number = $1)",
        )
        .bind(phone.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn register(&self, new_account: &NewAccount) -> AccountsResult<Account> {
        let mut tx = self.pool.begin().await?;

        // Get-or-create the default role in the same transaction
        let role_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO roles (role_id, name, display_name, permissions, is_active)
            VALUES ($1, $2, $3, '[]'::jsonb, TRUE)
            ON CONFLICT (name) DO UPDATE SET updated_at = now()
            RETURNING role_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(DEFAULT_ROLE)
        .bind("Customer")
        .fetch_one(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (
                account_id, role_id, phone_number, email,
                first_name, last_name, password_hash
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING account_id, role_id, phone_number, email, first_name, last_name,
                      avatar_url, password_hash, is_active, registered_at, updated_at
            "#,
        )
        .bind(new_account.account_id)
        .bind(role_id)
        .bind(new_account.phone_number.as_str())
        .bind(new_account.email.as_ref().map(Email::as_str))
        .bind(new_account.first_name.as_ref().map(PersonName::as_str))
        .bind(new_account.last_name.as_ref().map(PersonName::as_str))
        .bind(&new_account.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            // A concurrent register can still win the unique race
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AccountsError::PhoneAlreadyExists
            }
            _ => AccountsError::Database(e),
        })?;

        tx.commit().await?;

        tracing::info!(account_id = %row.account_id, "Account row inserted");

        Ok(row.into_account())
    }

    async fn update_password(&self, account_id: Uuid, password_hash: &str) -> AccountsResult<()> {
        sqlx::query(
            "UPDATE accounts SET password_hash = $2, updated_at = now() WHERE account_id = $1",
        )
        .bind(account_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_profile(
        &self,
        account_id: Uuid,
        changes: &ProfileChanges,
    ) -> AccountsResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts
            SET email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                avatar_url = COALESCE($5, avatar_url),
                updated_at = now()
            WHERE account_id = $1
            RETURNING account_id, role_id, phone_number, email, first_name, last_name,
                      avatar_url, password_hash, is_active, registered_at, updated_at
            "#,
        )
        .bind(account_id)
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.first_name.as_ref().map(PersonName::as_str))
        .bind(changes.last_name.as_ref().map(PersonName::as_str))
        .bind(changes.avatar_url.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AccountsError::NotFound("Account"))?;

        Ok(row.into_account())
    }

    async fn find_auth_context(&self, account_id: Uuid) -> AccountsResult<Option<AuthContext>> {
        let row = sqlx::query_as::<_, (Uuid, String, bool)>(
            r#"
            SELECT a.account_id, r.name, a.is_active
            FROM accounts a
            JOIN roles r ON r.role_id = a.role_id
            WHERE a.account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(account_id, role_name, is_active)| AuthContext {
            account_id,
            role_name,
            is_active,
        }))
    }
}

impl RoleRepository for PgAccountsRepository {
    async fn list_roles(&self) -> AccountsResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT role_id, name, display_name, description, permissions,
                   is_active, created_at, updated_at
            FROM roles
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoleRow::into_role).collect())
    }

    async fn find_role(&self, role_id: Uuid) -> AccountsResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT role_id, name, display_name, description, permissions,
                   is_active, created_at, updated_at
            FROM roles
            WHERE role_id = $1
            "#,
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn create_role(&self, changes: &RoleChanges) -> AccountsResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (role_id, name, display_name, description, permissions, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING role_id, name, display_name, description, permissions,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&changes.name)
        .bind(&changes.display_name)
        .bind(changes.description.as_deref())
        .bind(&changes.permissions)
        .bind(changes.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AccountsError::Validation {
                    field: "name",
                    message: "A role with this name already exists".to_string(),
                }
            }
            _ => AccountsError::Database(e),
        })?;

        Ok(row.into_role())
    }

    async fn update_role(
        &self,
        role_id: Uuid,
        changes: &RoleChanges,
    ) -> AccountsResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE roles
            SET name = $2, display_name = $3, description = $4,
                permissions = $5, is_active = $6, updated_at = now()
            WHERE role_id = $1
            RETURNING role_id, name, display_name, description, permissions,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(role_id)
        .bind(&changes.name)
        .bind(&changes.display_name)
        .bind(changes.description.as_deref())
        .bind(&changes.permissions)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn delete_role(&self, role_id: Uuid) -> AccountsResult<bool> {
        let deleted = sqlx::query("DELETE FROM roles WHERE role_id = $1")
            .bind(role_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

impl AddressRepository for PgAccountsRepository {
    async fn list_addresses(&self, account_id: Uuid) -> AccountsResult<Vec<Address>> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT address_id, account_id, title, full_address, postal_code, city,
                   latitude, longitude, created_at, updated_at
            FROM addresses
            WHERE account_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AddressRow::into_address).collect())
    }

    async fn find_address(
        &self,
        address_id: Uuid,
        account_id: Uuid,
    ) -> AccountsResult<Option<Address>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT address_id, account_id, title, full_address, postal_code, city,
                   latitude, longitude, created_at, updated_at
            FROM addresses
            WHERE address_id = $1 AND account_id = $2
            "#,
        )
        .bind(address_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_address))
    }

    async fn create_address(
        &self,
        account_id: Uuid,
        changes: &AddressChanges,
    ) -> AccountsResult<Address> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            INSERT INTO addresses (
                address_id, account_id, title, full_address,
                postal_code, city, latitude, longitude
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING address_id, account_id, title, full_address, postal_code, city,
                      latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .bind(&changes.title)
        .bind(&changes.full_address)
        .bind(&changes.postal_code)
        .bind(&changes.city)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_address())
    }

    async fn update_address(
        &self,
        address_id: Uuid,
        account_id: Uuid,
        changes: &AddressChanges,
    ) -> AccountsResult<Option<Address>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            UPDATE addresses
            SET title = $3, full_address = $4, postal_code = $5, city = $6,
                latitude = $7, longitude = $8, updated_at = now()
            WHERE address_id = $1 AND account_id = $2
            RETURNING address_id, account_id, title, full_address, postal_code, city,
                      latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(address_id)
        .bind(account_id)
        .bind(&changes.title)
        .bind(&changes.full_address)
        .bind(&changes.postal_code)
        .bind(&changes.city)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_address))
    }

    async fn delete_address(&self, address_id: Uuid, account_id: Uuid) -> AccountsResult<bool> {
        let deleted = sqlx::query(
            "DELETE FROM addresses WHERE address_id = $1 AND account_id = $2",
        )
        .bind(address_id)
        .bind(account_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }
}

impl TokenDenyListRepository for PgAccountsRepository {
    async fn revoke(&self, token_id: Uuid, account_id: Uuid) -> AccountsResult<bool> {
        // Insert-once: zero rows affected means a prior revoke won
        let inserted = sqlx::query(
            r#"
            INSERT INTO revoked_renewal_tokens (token_id, account_id)
            VALUES ($1, $2)
            ON CONFLICT (token_id) DO NOTHING
            "#,
        )
        .bind(token_id)
        .bind(account_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    async fn is_revoked(&self, token_id: Uuid) -> AccountsResult<bool> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_renewal_tokens WHERE token_id = $1)",
        )
        .bind(token_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    role_id: Uuid,
    phone_number: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
    password_hash: String,
    is_active: bool,
    registered_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: self.account_id,
            role_id: self.role_id,
            phone_number: PhoneNumber::from_db(self.phone_number),
            email: self.email.map(Email::from_db),
            first_name: self.first_name.map(PersonName::from_db),
            last_name: self.last_name.map(PersonName::from_db),
            avatar_url: self.avatar_url,
            password_hash: self.password_hash,
            is_active: self.is_active,
            registered_at: self.registered_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    role_id: Uuid,
    name: String,
    display_name: String,
    description: Option<String>,
    permissions: serde_json::Value,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl RoleRow {
    fn into_role(self) -> Role {
        Role {
            role_id: self.role_id,
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            permissions: self.permissions,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    address_id: Uuid,
    account_id: Uuid,
    title: String,
    full_address: String,
    postal_code: String,
    city: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl AddressRow {
    fn into_address(self) -> Address {
        Address {
            address_id: self.address_id,
            account_id: self.account_id,
            title: self.title,
            full_address: self.full_address,
            postal_code: self.postal_code,
            city: self.city,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
