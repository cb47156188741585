//! Accounts Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::infra::postgres::PgAccountsRepository;
use crate::presentation::handlers::{self, AccountsAppState, AccountsRepo};
use crate::presentation::middleware::{AccountsMiddlewareState, require_account};

/// Create the accounts router with the PostgreSQL repository
pub fn accounts_router(repo: PgAccountsRepository, config: AccountsConfig) -> Router {
    accounts_router_generic(repo, config)
}

/// Create a generic accounts router for any repository implementation
pub fn accounts_router_generic<R>(repo: R, config: AccountsConfig) -> Router
where
    R: AccountsRepo,
{
    let state = AccountsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let mw_state = AccountsMiddlewareState {
        repo: state.repo.clone(),
        config: state.config.clone(),
    };

    let public = Router::new()
        .route("/send-otp", post(handlers::send_otp::<R>))
        .route("/verify-otp", post(handlers::verify_otp::<R>))
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/token/refresh", post(handlers::refresh_token::<R>))
        .route("/reset-password", post(handlers::reset_password::<R>));

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R>))
        .route("/change-password", post(handlers::change_password::<R>))
        .route(
            "/profile",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route(
            "/roles",
            get(handlers::list_roles::<R>).post(handlers::create_role::<R>),
        )
        .route(
            "/roles/{role_id}",
            get(handlers::get_role::<R>)
                .put(handlers::update_role::<R>)
                .delete(handlers::delete_role::<R>),
        )
        .route(
            "/addresses",
            get(handlers::list_addresses::<R>).post(handlers::create_address::<R>),
        )
        .route(
            "/addresses/{address_id}",
            get(handlers::get_address::<R>)
                .put(handlers::update_address::<R>)
                .delete(handlers::delete_address::<R>),
        )
        .route_layer(middleware::from_fn(move |req, next| {
            require_account(mw_state.clone(), req, next)
        }));

    public.merge(protected).with_state(state)
}
