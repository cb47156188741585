//! Unit tests for the accounts crate
//!
//! The full flows run against the in-memory repository; the use cases
//! only see the repository traits, so the coverage carries over to the
//! Postgres implementation's semantics.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::application::{
    ChangePasswordUseCase, LoginUseCase, LogoutUseCase, RefreshTokenUseCase, RegisterInput,
    RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, SendOtpUseCase, VerifyOtpInput,
    VerifyOtpUseCase,
};
use crate::domain::entity::{VerificationChallenge, challenge_key, marker_key};
use crate::domain::repository::{AccountRepository, VerificationStore};
use crate::domain::value_object::PhoneNumber;
use crate::error::AccountsError;
use crate::infra::memory::MemoryAccountsRepository;

const PHONE: &str = "09123456789";
const PASSWORD: &str = "password123";

fn setup() -> (Arc<MemoryAccountsRepository>, Arc<AccountsConfig>) {
    (
        Arc::new(MemoryAccountsRepository::new()),
        Arc::new(AccountsConfig::development()),
    )
}

/// Drive send-otp and verify-otp, returning the issue token
async fn verify_phone(
    repo: &Arc<MemoryAccountsRepository>,
    config: &Arc<AccountsConfig>,
    phone: &str,
) -> Uuid {
    let output = SendOtpUseCase::new(repo.clone(), config.clone())
        .execute(phone)
        .await
        .unwrap();

    VerifyOtpUseCase::new(repo.clone(), config.clone())
        .execute(VerifyOtpInput {
            phone_number: phone.to_string(),
            otp: output.otp,
            issue_token: output.issue_token,
        })
        .await
        .unwrap();

    output.issue_token
}

async fn register_account(
    repo: &Arc<MemoryAccountsRepository>,
    config: &Arc<AccountsConfig>,
    phone: &str,
) {
    let issue_token = verify_phone(repo, config, phone).await;

    RegisterUseCase::new(repo.clone(), repo.clone(), config.clone())
        .execute(RegisterInput {
            phone_number: phone.to_string(),
            issue_token,
            password: PASSWORD.to_string(),
            email: None,
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap();
}

mod send_otp_tests {
    use super::*;

    #[tokio::test]
    async fn test_send_otp_issues_challenge() {
        let (repo, config) = setup();
        let use_case = SendOtpUseCase::new(repo.clone(), config.clone());

        let output = use_case.execute(PHONE).await.unwrap();
        assert!((100_000..=999_999).contains(&output.otp));

        let phone = PhoneNumber::new(PHONE).unwrap();
        let stored = repo.get(&challenge_key(&phone)).await.unwrap().unwrap();
        let challenge: VerificationChallenge = serde_json::from_value(stored).unwrap();
        assert_eq!(challenge.otp, output.otp);
        assert_eq!(challenge.issue_token, output.issue_token);
    }

    #[tokio::test]
    async fn test_resend_within_cooldown_rejected() {
        let (repo, config) = setup();
        let use_case = SendOtpUseCase::new(repo.clone(), config.clone());

        use_case.execute(PHONE).await.unwrap();
        let err = use_case.execute(PHONE).await.unwrap_err();
        assert!(matches!(err, AccountsError::OtpCooldown));
    }

    #[tokio::test]
    async fn test_resend_after_cooldown_reissues() {
        let (repo, config) = setup();
        let phone = PhoneNumber::new(PHONE).unwrap();

        // Seed a challenge older than the cooldown window
        let mut old = VerificationChallenge::new(123_456);
        old.created_at = Utc::now() - chrono::Duration::minutes(3);
        repo.set(
            &challenge_key(&phone),
            serde_json::to_value(&old).unwrap(),
            config.otp_ttl,
        )
        .await
        .unwrap();

        let output = SendOtpUseCase::new(repo.clone(), config.clone())
            .execute(PHONE)
            .await
            .unwrap();
        assert_ne!(output.issue_token, old.issue_token);
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected() {
        let (repo, config) = setup();
        let use_case = SendOtpUseCase::new(repo.clone(), config.clone());

        for phone in ["0912345678", "091234567890", "08123456789", "09abc456789"] {
            let err = use_case.execute(phone).await.unwrap_err();
            assert!(matches!(err, AccountsError::InvalidPhoneFormat), "{phone}");
        }
    }
}

mod verify_otp_tests {
    use super::*;

    #[tokio::test]
    async fn test_verify_writes_marker_and_keeps_challenge() {
        let (repo, config) = setup();
        verify_phone(&repo, &config, PHONE).await;

        let phone = PhoneNumber::new(PHONE).unwrap();
        assert!(repo.get(&marker_key(&phone)).await.unwrap().is_some());
        assert!(repo.get(&challenge_key(&phone)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_verify_without_challenge_expired() {
        let (repo, config) = setup();
        let err = VerifyOtpUseCase::new(repo.clone(), config.clone())
            .execute(VerifyOtpInput {
                phone_number: PHONE.to_string(),
                otp: 123_456,
                issue_token: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::VerificationExpired));
    }

    #[tokio::test]
    async fn test_verify_wrong_issue_token() {
        let (repo, config) = setup();
        let output = SendOtpUseCase::new(repo.clone(), config.clone())
            .execute(PHONE)
            .await
            .unwrap();

        let err = VerifyOtpUseCase::new(repo.clone(), config.clone())
            .execute(VerifyOtpInput {
                phone_number: PHONE.to_string(),
                otp: output.otp,
                issue_token: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidIssueToken));
    }

    #[tokio::test]
    async fn test_verify_wrong_otp() {
        let (repo, config) = setup();
        let output = SendOtpUseCase::new(repo.clone(), config.clone())
            .execute(PHONE)
            .await
            .unwrap();

        let wrong_otp = if output.otp == 999_999 {
            100_000
        } else {
            output.otp + 1
        };

        let err = VerifyOtpUseCase::new(repo.clone(), config.clone())
            .execute(VerifyOtpInput {
                phone_number: PHONE.to_string(),
                otp: wrong_otp,
                issue_token: output.issue_token,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidOtp));

        let phone = PhoneNumber::new(PHONE).unwrap();
        assert!(repo.get(&marker_key(&phone)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_verify_already_verified() {
        let (repo, config) = setup();
        let output = SendOtpUseCase::new(repo.clone(), config.clone())
            .execute(PHONE)
            .await
            .unwrap();

        let input = VerifyOtpInput {
            phone_number: PHONE.to_string(),
            otp: output.otp,
            issue_token: output.issue_token,
        };

        let use_case = VerifyOtpUseCase::new(repo.clone(), config.clone());
        use_case.execute(input.clone()).await.unwrap();

        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(err, AccountsError::AlreadyVerified));
    }
}

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_creates_account_and_cleans_up() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let phone = PhoneNumber::new(PHONE).unwrap();
        let account = repo.find_by_phone(&phone).await.unwrap().unwrap();
        assert!(account.is_active);
        assert!(account.password_hash.starts_with("$argon2"));

        // Ephemeral records are gone after the durable insert
        assert!(repo.get(&marker_key(&phone)).await.unwrap().is_none());
        assert!(repo.get(&challenge_key(&phone)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_phone_rejected() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let issue_token = verify_phone(&repo, &config, PHONE).await;
        let err = RegisterUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(RegisterInput {
                phone_number: PHONE.to_string(),
                issue_token,
                password: PASSWORD.to_string(),
                email: None,
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::PhoneAlreadyExists));
    }

    #[tokio::test]
    async fn test_register_without_verification_rejected() {
        let (repo, config) = setup();
        let err = RegisterUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(RegisterInput {
                phone_number: PHONE.to_string(),
                issue_token: Uuid::new_v4(),
                password: PASSWORD.to_string(),
                email: None,
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::VerificationRequired));
    }

    #[tokio::test]
    async fn test_register_wrong_issue_token_rejected() {
        let (repo, config) = setup();
        verify_phone(&repo, &config, PHONE).await;

        let err = RegisterUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(RegisterInput {
                phone_number: PHONE.to_string(),
                issue_token: Uuid::new_v4(),
                password: PASSWORD.to_string(),
                email: None,
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidIssueToken));
    }

    #[tokio::test]
    async fn test_register_short_password_rejected() {
        let (repo, config) = setup();
        let issue_token = verify_phone(&repo, &config, PHONE).await;

        let err = RegisterUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(RegisterInput {
                phone_number: PHONE.to_string(),
                issue_token,
                password: "short".to_string(),
                email: None,
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountsError::PasswordPolicy {
                field: "password",
                ..
            }
        ));
    }
}

mod login_tests {
    use super::*;
    use platform::token::{self, TokenKind};

    #[tokio::test]
    async fn test_login_returns_valid_tokens() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        let access =
            token::decode(&output.access_token, TokenKind::Access, &config.token_secret).unwrap();
        assert_eq!(access.account_id, output.account.account_id);

        let renewal = token::decode(
            &output.renewal_token,
            TokenKind::Renewal,
            &config.token_secret,
        )
        .unwrap();
        assert_eq!(renewal.account_id, output.account.account_id);
        assert_ne!(access.token_id, renewal.token_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let err = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, "wrongpassword".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_phone() {
        let (repo, config) = setup();
        let err = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_inactive_account() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let phone = PhoneNumber::new(PHONE).unwrap();
        let account = repo.find_by_phone(&phone).await.unwrap().unwrap();
        repo.set_active(account.account_id, false).await;

        // Deactivation is reported before the password is checked
        let err = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, "wrongpassword".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::AccountInactive));
    }
}

mod logout_tests {
    use super::*;

    #[tokio::test]
    async fn test_logout_revokes_once() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        let use_case = LogoutUseCase::new(repo.clone(), config.clone());
        use_case.execute(&output.renewal_token).await.unwrap();

        let err = use_case.execute(&output.renewal_token).await.unwrap_err();
        assert!(matches!(err, AccountsError::AlreadyRevoked));
    }

    #[tokio::test]
    async fn test_logout_rejects_access_token() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        let err = LogoutUseCase::new(repo.clone(), config.clone())
            .execute(&output.access_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::InvalidRenewalToken));
    }
}

mod refresh_tests {
    use super::*;
    use platform::token::{self, TokenKind};

    #[tokio::test]
    async fn test_refresh_mints_access_token() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let login = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        let output = RefreshTokenUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(&login.renewal_token)
            .await
            .unwrap();

        let claims =
            token::decode(&output.access_token, TokenKind::Access, &config.token_secret).unwrap();
        assert_eq!(claims.account_id, login.account.account_id);
    }

    #[tokio::test]
    async fn test_refresh_with_revoked_token() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let login = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        LogoutUseCase::new(repo.clone(), config.clone())
            .execute(&login.renewal_token)
            .await
            .unwrap();

        let err = RefreshTokenUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(&login.renewal_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_refresh_with_garbage_token() {
        let (repo, config) = setup();
        let err = RefreshTokenUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute("not-a-token")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_refresh_for_deactivated_account() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let login = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        repo.set_active(login.account.account_id, false).await;

        let err = RefreshTokenUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(&login.renewal_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::NotAuthenticated));
    }
}

mod reset_password_tests {
    use super::*;

    #[tokio::test]
    async fn test_reset_password_full_flow() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        // Reset requires a fresh verification round
        let issue_token = verify_phone(&repo, &config, PHONE).await;
        ResetPasswordUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(ResetPasswordInput {
                phone_number: PHONE.to_string(),
                issue_token,
                new_password: "newpassword456".to_string(),
            })
            .await
            .unwrap();

        let login = LoginUseCase::new(repo.clone(), config.clone());
        let err = login.execute(PHONE, PASSWORD.to_string()).await.unwrap_err();
        assert!(matches!(err, AccountsError::InvalidCredentials));

        login
            .execute(PHONE, "newpassword456".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reset_password_consumes_marker() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let issue_token = verify_phone(&repo, &config, PHONE).await;
        let use_case = ResetPasswordUseCase::new(repo.clone(), repo.clone(), config.clone());
        let input = ResetPasswordInput {
            phone_number: PHONE.to_string(),
            issue_token,
            new_password: "newpassword456".to_string(),
        };

        use_case.execute(input.clone()).await.unwrap();

        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(err, AccountsError::VerificationRequired));
    }

    #[tokio::test]
    async fn test_reset_password_unknown_account() {
        let (repo, config) = setup();
        let issue_token = verify_phone(&repo, &config, PHONE).await;

        let err = ResetPasswordUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(ResetPasswordInput {
                phone_number: PHONE.to_string(),
                issue_token,
                new_password: "newpassword456".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::AccountNotFound));
    }

    #[tokio::test]
    async fn test_reset_password_without_verification() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let err = ResetPasswordUseCase::new(repo.clone(), repo.clone(), config.clone())
            .execute(ResetPasswordInput {
                phone_number: PHONE.to_string(),
                issue_token: Uuid::new_v4(),
                new_password: "newpassword456".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::VerificationRequired));
    }
}

mod change_password_tests {
    use super::*;

    #[tokio::test]
    async fn test_change_password() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let phone = PhoneNumber::new(PHONE).unwrap();
        let account = repo.find_by_phone(&phone).await.unwrap().unwrap();

        ChangePasswordUseCase::new(repo.clone(), config.clone())
            .execute(
                account.account_id,
                PASSWORD.to_string(),
                "newpassword456".to_string(),
            )
            .await
            .unwrap();

        LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, "newpassword456".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_wrong_old() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let phone = PhoneNumber::new(PHONE).unwrap();
        let account = repo.find_by_phone(&phone).await.unwrap().unwrap();

        let err = ChangePasswordUseCase::new(repo.clone(), config.clone())
            .execute(
                account.account_id,
                "wrongpassword".to_string(),
                "newpassword456".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountsError::WrongOldPassword));
    }
}

mod error_response_tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    async fn body_json(err: AccountsError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_field_scoped_errors_are_400() {
        let (status, body) = body_json(AccountsError::OtpCooldown).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["phone_number"][0].is_string());

        let (status, body) = body_json(AccountsError::InvalidOtp).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["otp"][0].is_string());
    }

    #[tokio::test]
    async fn test_credential_errors_are_401_detail() {
        for err in [
            AccountsError::InvalidCredentials,
            AccountsError::AccountInactive,
            AccountsError::NotAuthenticated,
        ] {
            let (status, body) = body_json(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body["detail"].is_string());
            assert!(body.get("errors").is_none());
        }
    }

    #[tokio::test]
    async fn test_admin_only_is_403() {
        let (status, body) = body_json(AccountsError::AdminOnly).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_not_found_is_404() {
        let (status, _) = body_json(AccountsError::NotFound("Role")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_database_error_is_503_with_generic_detail() {
        let (status, body) = body_json(AccountsError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        // Internals never leak into the response body
        let detail = body["detail"].as_str().unwrap();
        assert!(!detail.to_lowercase().contains("pool"));
    }
}

mod router_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::presentation::router::accounts_router_generic;

    fn request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_otp_route() {
        let (repo, config) = setup();
        let app = accounts_router_generic((*repo).clone(), (*config).clone());

        let response = app
            .oneshot(request(
                "POST",
                "/send-otp",
                serde_json::json!({ "phone_number": PHONE }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["otp"].is_number());
        assert!(body["issue_token"].is_string());
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let (repo, config) = setup();
        let app = accounts_router_generic((*repo).clone(), (*config).clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_route_with_access_token() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let login = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        let app = accounts_router_generic((*repo).clone(), (*config).clone());
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/profile")
                    .header(
                        header::AUTHORIZATION,
                        format!("Bearer {}", login.access_token),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["phone_number"], PHONE);
    }

    #[tokio::test]
    async fn test_roles_require_admin() {
        let (repo, config) = setup();
        register_account(&repo, &config, PHONE).await;

        let login = LoginUseCase::new(repo.clone(), config.clone())
            .execute(PHONE, PASSWORD.to_string())
            .await
            .unwrap();

        let app = accounts_router_generic((*repo).clone(), (*config).clone());
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/roles")
                    .header(
                        header::AUTHORIZATION,
                        format!("Bearer {}", login.access_token),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
