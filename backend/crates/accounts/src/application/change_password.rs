//! Change Password Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountsError, AccountsResult};
use platform::password::{ClearTextPassword, HashedPassword};

/// Change Password Use Case (authenticated)
pub struct ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    config: Arc<AccountsConfig>,
}

impl<A> ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: Arc<AccountsConfig>) -> Self {
        Self { accounts, config }
    }

    pub async fn execute(
        &self,
        account_id: Uuid,
        old_password: String,
        new_password: String,
    ) -> AccountsResult<()> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountsError::NotAuthenticated)?;

        // An input the policy rejects cannot equal a stored password
        let old_password =
            ClearTextPassword::new(old_password).map_err(|_| AccountsError::WrongOldPassword)?;

        let hashed = HashedPassword::from_phc_string(&account.password_hash)
            .map_err(AccountsError::Hashing)?;

        if !hashed.verify(&old_password, self.config.pepper()) {
            return Err(AccountsError::WrongOldPassword);
        }

        let new_password = ClearTextPassword::new(new_password)
            .map_err(|e| AccountsError::password_policy("new_password", e))?;

        let new_hash = new_password.hash(self.config.pepper())?;

        self.accounts
            .update_password(account_id, new_hash.as_phc_string())
            .await?;

        tracing::info!(account_id = %account_id, "Password changed");

        Ok(())
    }
}
