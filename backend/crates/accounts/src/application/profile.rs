//! Profile Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::{Account, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{Email, PersonName};
use crate::error::{AccountsError, AccountsResult};

/// Input DTO for profile update
///
/// Absent fields are left unchanged; the phone number is read-only.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Profile Use Case (authenticated)
pub struct ProfileUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> ProfileUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn get(&self, account_id: Uuid) -> AccountsResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountsError::NotAuthenticated)
    }

    pub async fn update(
        &self,
        account_id: Uuid,
        input: UpdateProfileInput,
    ) -> AccountsResult<Account> {
        let changes = ProfileChanges {
            email: input.email.map(Email::new).transpose()?,
            first_name: input
                .first_name
                .map(|n| PersonName::new(n, "first_name"))
                .transpose()?,
            last_name: input
                .last_name
                .map(|n| PersonName::new(n, "last_name"))
                .transpose()?,
            avatar_url: input.avatar_url,
        };

        let account = self.accounts.update_profile(account_id, &changes).await?;

        tracing::info!(account_id = %account_id, "Profile updated");

        Ok(account)
    }
}
