//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::application::{
    ChangePasswordUseCase, LoginUseCase, LogoutUseCase, ProfileUseCase, RefreshTokenUseCase,
    RegisterInput, RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, SendOtpUseCase,
    UpdateProfileInput, VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::entity::{AddressChanges, RoleChanges};
use crate::domain::repository::{
    AccountRepository, AddressRepository, RoleRepository, TokenDenyListRepository,
    VerificationStore,
};
use crate::error::{AccountsError, AccountsResult};
use crate::presentation::dto::{
    AddressRequest, AddressResponse, ChangePasswordRequest, DetailResponse, LoginRequest,
    LoginResponse, LogoutRequest, ProfileResponse, RefreshTokenRequest, RefreshTokenResponse,
    RegisterRequest, ResetPasswordRequest, RoleRequest, RoleResponse, SendOtpRequest,
    SendOtpResponse, UpdateProfileRequest, VerifyOtpRequest,
};
use crate::presentation::middleware::CurrentAccount;

/// Everything the accounts handlers need from a repository, in one bound.
pub trait AccountsRepo:
    VerificationStore
    + AccountRepository
    + RoleRepository
    + AddressRepository
    + TokenDenyListRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AccountsRepo for T where
    T: VerificationStore
        + AccountRepository
        + RoleRepository
        + AddressRepository
        + TokenDenyListRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for accounts handlers
#[derive(Clone)]
pub struct AccountsAppState<R>
where
    R: AccountsRepo,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

/// POST /api/accounts/send-otp
pub async fn send_otp<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<SendOtpRequest>,
) -> AccountsResult<Json<SendOtpResponse>>
where
    R: AccountsRepo,
{
    let use_case = SendOtpUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(&req.phone_number).await?;

    Ok(Json(SendOtpResponse {
        otp: output.otp,
        issue_token: output.issue_token,
    }))
}

/// POST /api/accounts/verify-otp
pub async fn verify_otp<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AccountsResult<Json<DetailResponse>>
where
    R: AccountsRepo,
{
    let use_case = VerifyOtpUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(VerifyOtpInput {
            phone_number: req.phone_number,
            otp: req.otp,
            issue_token: req.issue_token,
        })
        .await?;

    Ok(Json(DetailResponse {
        detail: "Phone number verified",
    }))
}

/// POST /api/accounts/register
pub async fn register<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountsResult<impl IntoResponse>
where
    R: AccountsRepo,
{
    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    use_case
        .execute(RegisterInput {
            phone_number: req.phone_number,
            issue_token: req.issue_token,
            password: req.password,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DetailResponse {
            detail: "Account registered",
        }),
    ))
}

/// POST /api/accounts/login
pub async fn login<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountsResult<Json<LoginResponse>>
where
    R: AccountsRepo,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(&req.phone_number, req.password).await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        renewal_token: output.renewal_token,
        user: ProfileResponse::from(&output.account),
    }))
}

/// POST /api/accounts/token/refresh
pub async fn refresh_token<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<RefreshTokenRequest>,
) -> AccountsResult<Json<RefreshTokenResponse>>
where
    R: AccountsRepo,
{
    let use_case =
        RefreshTokenUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case.execute(&req.renewal_token).await?;

    Ok(Json(RefreshTokenResponse {
        access_token: output.access_token,
    }))
}

/// POST /api/accounts/logout (authenticated)
pub async fn logout<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<LogoutRequest>,
) -> AccountsResult<Json<DetailResponse>>
where
    R: AccountsRepo,
{
    let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(&req.renewal_token).await?;

    Ok(Json(DetailResponse {
        detail: "Logged out",
    }))
}

/// POST /api/accounts/reset-password
pub async fn reset_password<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AccountsResult<Json<DetailResponse>>
where
    R: AccountsRepo,
{
    let use_case =
        ResetPasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    use_case
        .execute(ResetPasswordInput {
            phone_number: req.phone_number,
            issue_token: req.issue_token,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(DetailResponse {
        detail: "Password reset",
    }))
}

/// POST /api/accounts/change-password (authenticated)
pub async fn change_password<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<ChangePasswordRequest>,
) -> AccountsResult<Json<DetailResponse>>
where
    R: AccountsRepo,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(current.account_id, req.old_password, req.new_password)
        .await?;

    Ok(Json(DetailResponse {
        detail: "Password changed",
    }))
}

/// GET /api/accounts/profile (authenticated)
pub async fn get_profile<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> AccountsResult<Json<ProfileResponse>>
where
    R: AccountsRepo,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let account = use_case.get(current.account_id).await?;

    Ok(Json(ProfileResponse::from(&account)))
}

/// PUT /api/accounts/profile (authenticated)
pub async fn update_profile<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<UpdateProfileRequest>,
) -> AccountsResult<Json<ProfileResponse>>
where
    R: AccountsRepo,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let account = use_case
        .update(
            current.account_id,
            UpdateProfileInput {
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                avatar_url: req.avatar_url,
            },
        )
        .await?;

    Ok(Json(ProfileResponse::from(&account)))
}

fn require_admin(current: &CurrentAccount) -> AccountsResult<()> {
    if current.is_admin() {
        Ok(())
    } else {
        Err(AccountsError::AdminOnly)
    }
}

fn role_changes(req: RoleRequest) -> RoleChanges {
    RoleChanges {
        name: req.name,
        display_name: req.display_name,
        description: req.description,
        permissions: req.permissions,
        is_active: req.is_active,
    }
}

/// GET /api/accounts/roles (admin)
pub async fn list_roles<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> AccountsResult<Json<Vec<RoleResponse>>>
where
    R: AccountsRepo,
{
    require_admin(&current)?;
    let roles = state.repo.list_roles().await?;
    Ok(Json(roles.into_iter().map(RoleResponse::from).collect()))
}

/// POST /api/accounts/roles (admin)
pub async fn create_role<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<RoleRequest>,
) -> AccountsResult<impl IntoResponse>
where
    R: AccountsRepo,
{
    require_admin(&current)?;
    let role = state.repo.create_role(&role_changes(req)).await?;
    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

/// GET /api/accounts/roles/{role_id} (admin)
pub async fn get_role<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(role_id): Path<Uuid>,
) -> AccountsResult<Json<RoleResponse>>
where
    R: AccountsRepo,
{
    require_admin(&current)?;
    let role = state
        .repo
        .find_role(role_id)
        .await?
        .ok_or(AccountsError::NotFound("Role"))?;
    Ok(Json(RoleResponse::from(role)))
}

/// PUT /api/accounts/roles/{role_id} (admin)
pub async fn update_role<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(role_id): Path<Uuid>,
    Json(req): Json<RoleRequest>,
) -> AccountsResult<Json<RoleResponse>>
where
    R: AccountsRepo,
{
    require_admin(&current)?;
    let role = state
        .repo
        .update_role(role_id, &role_changes(req))
        .await?
        .ok_or(AccountsError::NotFound("Role"))?;
    Ok(Json(RoleResponse::from(role)))
}

/// DELETE /api/accounts/roles/{role_id} (admin)
pub async fn delete_role<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(role_id): Path<Uuid>,
) -> AccountsResult<StatusCode>
where
    R: AccountsRepo,
{
    require_admin(&current)?;
    if !state.repo.delete_role(role_id).await? {
        return Err(AccountsError::NotFound("Role"));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn address_changes(req: AddressRequest) -> AddressChanges {
    AddressChanges {
        title: req.title,
        full_address: req.full_address,
        postal_code: req.postal_code,
        city: req.city,
        latitude: req.latitude,
        longitude: req.longitude,
    }
}

/// GET /api/accounts/addresses (authenticated)
pub async fn list_addresses<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> AccountsResult<Json<Vec<AddressResponse>>>
where
    R: AccountsRepo,
{
    let addresses = state.repo.list_addresses(current.account_id).await?;
    Ok(Json(
        addresses.into_iter().map(AddressResponse::from).collect(),
    ))
}

/// POST /api/accounts/addresses (authenticated)
pub async fn create_address<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<AddressRequest>,
) -> AccountsResult<impl IntoResponse>
where
    R: AccountsRepo,
{
    let address = state
        .repo
        .create_address(current.account_id, &address_changes(req))
        .await?;
    Ok((StatusCode::CREATED, Json(AddressResponse::from(address))))
}

/// GET /api/accounts/addresses/{address_id} (authenticated)
pub async fn get_address<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(address_id): Path<Uuid>,
) -> AccountsResult<Json<AddressResponse>>
where
    R: AccountsRepo,
{
    let address = state
        .repo
        .find_address(address_id, current.account_id)
        .await?
        .ok_or(AccountsError::NotFound("Address"))?;
    Ok(Json(AddressResponse::from(address)))
}

/// PUT /api/accounts/addresses/{address_id} (authenticated)
pub async fn update_address<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(address_id): Path<Uuid>,
    Json(req): Json<AddressRequest>,
) -> AccountsResult<Json<AddressResponse>>
where
    R: AccountsRepo,
{
    let address = state
        .repo
        .update_address(address_id, current.account_id, &address_changes(req))
        .await?
        .ok_or(AccountsError::NotFound("Address"))?;
    Ok(Json(AddressResponse::from(address)))
}

/// DELETE /api/accounts/addresses/{address_id} (authenticated)
pub async fn delete_address<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(address_id): Path<Uuid>,
) -> AccountsResult<StatusCode>
where
    R: AccountsRepo,
{
    if !state
        .repo
        .delete_address(address_id, current.account_id)
        .await?
    {
        return Err(AccountsError::NotFound("Address"));
    }
    Ok(StatusCode::NO_CONTENT)
}
