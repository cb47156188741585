//! Accounts Error Types
//!
//! Domain-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Client errors tied to a single request field serialize as
//! `{"errors": {"<field>": ["<message>"]}}` with status 400; everything
//! else serializes as `{"detail": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Accounts-specific result type alias
pub type AccountsResult<T> = Result<T, AccountsError>;

/// Accounts-specific error variants
#[derive(Debug, Error)]
pub enum AccountsError {
    /// Phone number does not match the canonical 09XXXXXXXXX shape
    #[error("Phone number must be 11 digits starting with 09")]
    InvalidPhoneFormat,

    /// An OTP was issued less than the resend cooldown ago
    #[error("A verification code was sent recently, wait before requesting another")]
    OtpCooldown,

    /// A verified marker already exists for this phone number
    #[error("Phone number is already verified")]
    AlreadyVerified,

    /// No live challenge for this phone number
    #[error("Verification code has expired or was never requested")]
    VerificationExpired,

    /// Presented issue token does not match the stored one
    #[error("Invalid issue token")]
    InvalidIssueToken,

    /// Presented OTP does not match the challenge
    #[error("Invalid verification code")]
    InvalidOtp,

    /// Password rejected by policy (length, control characters)
    #[error("{source}")]
    PasswordPolicy {
        field: &'static str,
        #[source]
        source: PasswordPolicyError,
    },

    /// Phone number already registered
    #[error("An account with this phone number already exists")]
    PhoneAlreadyExists,

    /// No verified marker present for this phone number
    #[error("Phone number must be verified before this operation")]
    VerificationRequired,

    /// Reset requested for a phone number with no account
    #[error("No account found for this phone number")]
    AccountNotFound,

    /// Old password did not verify during a password change
    #[error("Old password is incorrect")]
    WrongOldPassword,

    /// Renewal token is already on the deny-list
    #[error("Renewal token is already revoked")]
    AlreadyRevoked,

    /// Renewal token failed structural or signature checks
    #[error("Invalid renewal token")]
    InvalidRenewalToken,

    /// Unknown phone number or wrong password (indistinguishable)
    #[error("Invalid phone number or password")]
    InvalidCredentials,

    /// Account exists but is deactivated
    #[error("Account is not active")]
    AccountInactive,

    /// Missing, malformed, expired, or revoked credentials
    #[error("Authentication credentials were not provided or are invalid")]
    NotAuthenticated,

    /// Authenticated account lacks the admin role
    #[error("You do not have permission to perform this action")]
    AdminOnly,

    /// Field-level validation failure (profile, addresses, roles)
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordHashError),

    /// Verification payload could not be (de)serialized
    #[error("Verification payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AccountsError {
    /// Shorthand for a password policy violation on the given field
    pub fn password_policy(field: &'static str, source: PasswordPolicyError) -> Self {
        AccountsError::PasswordPolicy { field, source }
    }

    /// The request field this error is scoped to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AccountsError::InvalidPhoneFormat
            | AccountsError::OtpCooldown
            | AccountsError::AlreadyVerified
            | AccountsError::VerificationExpired
            | AccountsError::PhoneAlreadyExists
            | AccountsError::VerificationRequired
            | AccountsError::AccountNotFound => Some("phone_number"),
            AccountsError::InvalidIssueToken => Some("issue_token"),
            AccountsError::InvalidOtp => Some("otp"),
            AccountsError::PasswordPolicy { field, .. } => Some(field),
            AccountsError::WrongOldPassword => Some("old_password"),
            AccountsError::AlreadyRevoked | AccountsError::InvalidRenewalToken => {
                Some("renewal_token")
            }
            AccountsError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountsError::InvalidCredentials
            | AccountsError::AccountInactive
            | AccountsError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AccountsError::AdminOnly => StatusCode::FORBIDDEN,
            AccountsError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountsError::Hashing(_) | AccountsError::Payload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AccountsError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::InvalidCredentials
            | AccountsError::AccountInactive
            | AccountsError::NotAuthenticated => ErrorKind::Unauthorized,
            AccountsError::AdminOnly => ErrorKind::Forbidden,
            AccountsError::NotFound(_) => ErrorKind::NotFound,
            AccountsError::Hashing(_) | AccountsError::Payload(_) => {
                ErrorKind::InternalServerError
            }
            AccountsError::Database(_) => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::BadRequest,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountsError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountsError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AccountsError::Payload(e) => {
                tracing::error!(error = %e, "Verification payload error");
            }
            AccountsError::InvalidCredentials | AccountsError::AccountInactive => {
                tracing::warn!(error = %self, "Login rejected");
            }
            AccountsError::OtpCooldown => {
                tracing::warn!("OTP resend cooldown hit");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl From<AccountsError> for AppError {
    fn from(err: AccountsError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();

        // Server errors get a generic detail so internals never leak
        let body = if status.is_server_error() {
            serde_json::json!({ "detail": self.kind().as_str() })
        } else {
            match self.field() {
                Some(field) => serde_json::json!({
                    "errors": { field: [self.to_string()] }
                }),
                None => serde_json::json!({ "detail": self.to_string() }),
            }
        };

        (status, Json(body)).into_response()
    }
}
