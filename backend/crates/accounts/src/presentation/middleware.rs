//! Accounts Middleware
//!
//! Middleware for requiring a valid access token on protected routes.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::domain::entity::ADMIN_ROLE;
use crate::domain::repository::AccountRepository;
use crate::error::AccountsError;
use platform::token::{self, TokenKind};

/// Middleware state
#[derive(Clone)]
pub struct AccountsMiddlewareState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

/// Authenticated caller stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: Uuid,
    pub role_name: String,
}

impl CurrentAccount {
    pub fn is_admin(&self) -> bool {
        self.role_name == ADMIN_ROLE
    }
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Middleware that requires a valid access token for an active account
///
/// On success a [`CurrentAccount`] is inserted into the request
/// extensions; every failure path returns 401 without distinguishing
/// missing, forged, expired, and deactivated credentials.
pub async fn require_account<R>(
    state: AccountsMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = bearer_token(&req) else {
        return Err(AccountsError::NotAuthenticated.into_response());
    };

    let claims = match token::decode(token, TokenKind::Access, &state.config.token_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Access token rejected");
            return Err(AccountsError::NotAuthenticated.into_response());
        }
    };

    let ctx = match state.repo.find_auth_context(claims.account_id).await {
        Ok(Some(ctx)) => ctx,
        Ok(None) => return Err(AccountsError::NotAuthenticated.into_response()),
        Err(e) => return Err(e.into_response()),
    };

    if !ctx.is_active {
        return Err(AccountsError::NotAuthenticated.into_response());
    }

    req.extensions_mut().insert(CurrentAccount {
        account_id: ctx.account_id,
        role_name: ctx.role_name,
    });

    Ok(next.run(req).await)
}
