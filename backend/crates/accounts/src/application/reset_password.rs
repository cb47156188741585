//! Reset Password Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{VerifiedMarker, marker_key};
use crate::domain::repository::{AccountRepository, VerificationStore};
use crate::domain::value_object::PhoneNumber;
use crate::error::{AccountsError, AccountsResult};
use platform::password::ClearTextPassword;

/// Input DTO for password reset
#[derive(Debug, Clone)]
pub struct ResetPasswordInput {
    pub phone_number: String,
    pub issue_token: Uuid,
    pub new_password: String,
}

/// Reset Password Use Case
///
/// Requires a fresh OTP verification (the `verified_<phone>` marker).
/// Consumes the marker on success; the challenge record is untouched.
/// No session is issued, the client logs in with the new password.
pub struct ResetPasswordUseCase<S, A>
where
    S: VerificationStore,
    A: AccountRepository,
{
    store: Arc<S>,
    accounts: Arc<A>,
    config: Arc<AccountsConfig>,
}

impl<S, A> ResetPasswordUseCase<S, A>
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

    pub async fn execute(&self, input: ResetPasswordInput) -> AccountsResult<()> {
        let phone = PhoneNumber::new(&input.phone_number)?;

        let new_password = ClearTextPassword::new(input.new_password)
            .map_err(|e| AccountsError::password_policy("new_password", e))?;

        let marker: VerifiedMarker = match self.store.get(&marker_key(&phone)).await? {
            Some(value) => serde_json::from_value(value)?,
            None => return Err(AccountsError::VerificationRequired),
        };

        if marker.issue_token != input.issue_token {
            return Err(AccountsError::InvalidIssueToken);
        }

        let account = self
            .accounts
            .find_by_phone(&phone)
            .await?
            .ok_or(AccountsError::AccountNotFound)?;

        let password_hash = new_password.hash(self.config.pepper())?;

        self.accounts
            .update_password(account.account_id, password_hash.as_phc_string())
            .await?;

        self.store.delete(&marker_key(&phone)).await?;

        tracing::info!(account_id = %account.account_id, "Password reset");

        Ok(())
    }
}
