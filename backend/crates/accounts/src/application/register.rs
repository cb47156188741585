//! Register Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{NewAccount, VerifiedMarker, challenge_key, marker_key};
use crate::domain::repository::{AccountRepository, VerificationStore};
use crate::domain::value_object::{Email, PersonName, PhoneNumber};
use crate::error::{AccountsError, AccountsResult};
use platform::password::ClearTextPassword;

/// Input DTO for registration
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub phone_number: String,
    pub issue_token: Uuid,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Register Use Case
///
/// Precondition order: password policy, phone uniqueness, verified
/// marker, issue token. The durable insert happens in one transaction
/// inside the repository; the ephemeral records are deleted best-effort
/// strictly after it commits.
pub struct RegisterUseCase<S, A>
where
    S: VerificationStore,
    A: AccountRepository,
{
    store: Arc<S>,
    accounts: Arc<A>,
    config: Arc<AccountsConfig>,
}

impl<S, A> RegisterUseCase<S, A>
where
    S: VerificationStore,
    A: AccountRepository,
{
    pub fn new(store: Arc<S>, accounts: Arc<A>, config: Arc<AccountsConfig>) -> Self {
        Self {
            store,
            accounts,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountsResult<()> {
        let phone = PhoneNumber::new(&input.phone_number)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AccountsError::password_policy("password", e))?;

        if self.accounts.phone_exists(&phone).await? {
            return Err(AccountsError::PhoneAlreadyExists);
        }

        let marker: VerifiedMarker = match self.store.get(&marker_key(&phone)).await? {
            Some(value) => serde_json::from_value(value)?,
            None => return Err(AccountsError::VerificationRequired),
        };

        if marker.issue_token != input.issue_token {
            return Err(AccountsError::InvalidIssueToken);
        }

        let email = input.email.map(Email::new).transpose()?;
        let first_name = input
            .first_name
            .map(|n| PersonName::new(n, "first_name"))
            .transpose()?;
        let last_name = input
            .last_name
            .map(|n| PersonName::new(n, "last_name"))
            .transpose()?;

        let password_hash = password.hash(self.config.pepper())?;

        let new_account = NewAccount::new(
            phone.clone(),
            email,
            first_name,
            last_name,
            password_hash.as_phc_string().to_string(),
        );

        let account = self.accounts.register(&new_account).await?;

        tracing::info!(
            account_id = %account.account_id,
            phone = %phone,
            "Account registered"
        );

        // Cleanup after commit; a failure here only delays TTL expiry
        for key in [marker_key(&phone), challenge_key(&phone)] {
            if let Err(e) = self.store.delete(&key).await {
                tracing::warn!(error = %e, key = %key, "Verification cleanup failed");
            }
        }

        Ok(())
    }
}
