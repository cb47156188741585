//! Refresh Token Use Case

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::{AccountRepository, TokenDenyListRepository};
use crate::error::{AccountsError, AccountsResult};
use platform::token::{self, TokenClaims, TokenKind};

/// Output DTO for token refresh
#[derive(Debug, Clone)]
pub struct RefreshTokenOutput {
    pub access_token: String,
}

/// Refresh Token Use Case
///
/// Every rejection path collapses to `NotAuthenticated` so a probing
/// client cannot tell a revoked token from a forged one.
pub struct RefreshTokenUseCase<A, D>
where
    A: AccountRepository,
    D: TokenDenyListRepository,
{
    accounts: Arc<A>,
    deny_list: Arc<D>,
    config: Arc<AccountsConfig>,
}

impl<A, D> RefreshTokenUseCase<A, D>
where
    A: AccountRepository,
    D: TokenDenyListRepository,
{
    pub fn new(accounts: Arc<A>, deny_list: Arc<D>, config: Arc<AccountsConfig>) -> Self {
        Self {
            accounts,
            deny_list,
            config,
        }
    }

    pub async fn execute(&self, renewal_token: &str) -> AccountsResult<RefreshTokenOutput> {
        let claims = token::decode(renewal_token, TokenKind::Renewal, &self.config.token_secret)
            .map_err(|_| AccountsError::NotAuthenticated)?;

        if self.deny_list.is_revoked(claims.token_id).await? {
            tracing::warn!(token_id = %claims.token_id, "Refresh with revoked renewal token");
            return Err(AccountsError::NotAuthenticated);
        }

        let ctx = self
            .accounts
            .find_auth_context(claims.account_id)
            .await?
            .ok_or(AccountsError::NotAuthenticated)?;

        if !ctx.is_active {
            return Err(AccountsError::NotAuthenticated);
        }

        let access_claims = TokenClaims::new(
            ctx.account_id,
            TokenKind::Access,
            self.config.access_ttl_ms(),
        );

        Ok(RefreshTokenOutput {
            access_token: token::issue(&access_claims, &self.config.token_secret),
        })
    }
}
