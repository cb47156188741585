//! Verify OTP Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{VerificationChallenge, VerifiedMarker, challenge_key, marker_key};
use crate::domain::repository::VerificationStore;
use crate::domain::value_object::PhoneNumber;
use crate::error::{AccountsError, AccountsResult};

/// Input DTO for verify OTP
#[derive(Debug, Clone)]
pub struct VerifyOtpInput {
    pub phone_number: String,
    pub otp: u32,
    pub issue_token: Uuid,
}

/// Verify OTP Use Case
///
/// Precondition checks run in a fixed order: marker, challenge
/// existence, issue token, OTP. The challenge record is left in place on
/// success; registration cleans it up after its own commit.
pub struct VerifyOtpUseCase<S>
where
    S: VerificationStore,
{
    store: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> VerifyOtpUseCase<S>
where
    S: VerificationStore,
{
    pub fn new(store: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AccountsResult<()> {
        let phone = PhoneNumber::new(&input.phone_number)?;

        if self.store.get(&marker_key(&phone)).await?.is_some() {
            return Err(AccountsError::AlreadyVerified);
        }

        let challenge: VerificationChallenge = match self.store.get(&challenge_key(&phone)).await?
        {
            Some(value) => serde_json::from_value(value)?,
            None => return Err(AccountsError::VerificationExpired),
        };

        if challenge.issue_token != input.issue_token {
            return Err(AccountsError::InvalidIssueToken);
        }

        if challenge.otp != input.otp {
            return Err(AccountsError::InvalidOtp);
        }

        let marker = VerifiedMarker {
            issue_token: challenge.issue_token,
        };

        // Atomic check-and-set: the loser of a concurrent verification
        // race sees the winner's marker instead of overwriting it
        let written = self
            .store
            .set_if_absent(
                &marker_key(&phone),
                serde_json::to_value(&marker)?,
                self.config.marker_ttl,
            )
            .await?;

        if !written {
            return Err(AccountsError::AlreadyVerified);
        }

        tracing::info!(phone = %phone, "Phone number verified");

        Ok(())
    }
}
