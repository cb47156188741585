//! Logout Use Case

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::TokenDenyListRepository;
use crate::error::{AccountsError, AccountsResult};
use platform::token::{self, TokenKind};

/// Logout Use Case
///
/// Deny-lists the renewal token id. Access tokens stay valid until their
/// short TTL runs out; the renewal token can never mint another one.
pub struct LogoutUseCase<D>
where
    D: TokenDenyListRepository,
{
    deny_list: Arc<D>,
    config: Arc<AccountsConfig>,
}

impl<D> LogoutUseCase<D>
where
    D: TokenDenyListRepository,
{
    pub fn new(deny_list: Arc<D>, config: Arc<AccountsConfig>) -> Self {
        Self { deny_list, config }
    }

    pub async fn execute(&self, renewal_token: &str) -> AccountsResult<()> {
        let claims = token::decode(renewal_token, TokenKind::Renewal, &self.config.token_secret)
            .map_err(|_| AccountsError::InvalidRenewalToken)?;

        // Insert-once: losing to an earlier revoke is reported, not hidden
        let newly_revoked = self
            .deny_list
            .revoke(claims.token_id, claims.account_id)
            .await?;

        if !newly_revoked {
            return Err(AccountsError::AlreadyRevoked);
        }

        tracing::info!(
            account_id = %claims.account_id,
            token_id = %claims.token_id,
            "Renewal token revoked"
        );

        Ok(())
    }
}
