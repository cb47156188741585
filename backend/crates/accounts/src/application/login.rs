//! Login Use Case

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::PhoneNumber;
use crate::error::{AccountsError, AccountsResult};
use platform::password::{ClearTextPassword, HashedPassword};
use platform::token::{self, TokenClaims, TokenKind};

/// Output DTO for login
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub renewal_token: String,
    pub account: Account,
}

/// Login Use Case
///
/// Unknown phone number and wrong password both surface as
/// `InvalidCredentials`; an existing but deactivated account surfaces as
/// `AccountInactive` before the password is checked.
pub struct LoginUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    config: Arc<AccountsConfig>,
}

impl<A> LoginUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: Arc<AccountsConfig>) -> Self {
        Self { accounts, config }
    }

    pub async fn execute(&self, phone_number: &str, password: String) -> AccountsResult<LoginOutput> {
        let phone = PhoneNumber::new(phone_number)?;

        let account = self
            .accounts
            .find_by_phone(&phone)
            .await?
            .ok_or(AccountsError::InvalidCredentials)?;

        if !account.is_active {
            return Err(AccountsError::AccountInactive);
        }

        let password =
            ClearTextPassword::new(password).map_err(|_| AccountsError::InvalidCredentials)?;

        let hashed = HashedPassword::from_phc_string(&account.password_hash)
            .map_err(|_| AccountsError::InvalidCredentials)?;

        if !hashed.verify(&password, self.config.pepper()) {
            return Err(AccountsError::InvalidCredentials);
        }

        let access_claims = TokenClaims::new(
            account.account_id,
            TokenKind::Access,
            self.config.access_ttl_ms(),
        );
        let renewal_claims = TokenClaims::new(
            account.account_id,
            TokenKind::Renewal,
            self.config.renewal_ttl_ms(),
        );

        let access_token = token::issue(&access_claims, &self.config.token_secret);
        let renewal_token = token::issue(&renewal_claims, &self.config.token_secret);

        tracing::info!(account_id = %account.account_id, "Login succeeded");

        Ok(LoginOutput {
            access_token,
            renewal_token,
            account,
        })
    }
}
