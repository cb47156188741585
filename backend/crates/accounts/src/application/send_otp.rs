//! Send OTP Use Case

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{OTP_MAX, OTP_MIN, VerificationChallenge, challenge_key};
use crate::domain::repository::VerificationStore;
use crate::domain::value_object::PhoneNumber;
use crate::error::{AccountsError, AccountsResult};

/// Output DTO for send OTP
///
/// The OTP is returned in the response as a development stand-in for an
/// SMS gateway; a delivery channel replaces this field, not the flow.
#[derive(Debug, Clone)]
pub struct SendOtpOutput {
    pub otp: u32,
    pub issue_token: Uuid,
}

/// Send OTP Use Case
pub struct SendOtpUseCase<S>
where
    S: VerificationStore,
{
    store: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> SendOtpUseCase<S>
where
    S: VerificationStore,
{
    pub fn new(store: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, phone_number: &str) -> AccountsResult<SendOtpOutput> {
        let phone = PhoneNumber::new(phone_number)?;
        let key = challenge_key(&phone);

        // Resend cooldown: a fresh challenge blocks reissue until it ages out
        if let Some(value) = self.store.get(&key).await? {
            let existing: VerificationChallenge = serde_json::from_value(value)?;
            if existing.age_ms(Utc::now()) < self.config.resend_cooldown_ms() {
                return Err(AccountsError::OtpCooldown);
            }
        }

        let otp = rand::rng().random_range(OTP_MIN..=OTP_MAX);
        let challenge = VerificationChallenge::new(otp);

        self.store
            .set(&key, serde_json::to_value(&challenge)?, self.config.otp_ttl)
            .await?;

        tracing::info!(phone = %phone, "OTP challenge issued");

        Ok(SendOtpOutput {
            otp,
            issue_token: challenge.issue_token,
        })
    }
}
