//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use accounts::middleware::{AccountsMiddlewareState, require_account};
use accounts::{AccountsConfig, PgAccountsRepository, accounts_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use base64::Engine;
use base64::engine::general_purpose;
use catalog::{PgCatalogRepository, catalog_router};
use orders::{PgOrdersRepository, orders_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,accounts=info,catalog=info,orders=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: drop expired verification entries and stale
    // deny-list rows. Errors here should not prevent server startup.
    let accounts_repo_for_cleanup = PgAccountsRepository::new(pool.clone());
    match accounts_repo_for_cleanup.cleanup_expired().await {
        Ok((cache_entries, deny_list_entries)) => {
            tracing::info!(
                cache_entries_deleted = cache_entries,
                deny_list_entries_deleted = deny_list_entries,
                "Accounts cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Accounts cleanup failed, continuing anyway"
            );
        }
    }

    // Accounts configuration
    let accounts_config = if cfg!(debug_assertions) {
        AccountsConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);

        let pepper = env::var("PASSWORD_PEPPER")
            .ok()
            .map(|p| Engine::decode(&general_purpose::STANDARD, &p))
            .transpose()?;

        AccountsConfig {
            token_secret: secret,
            pepper,
            ..AccountsConfig::default()
        }
    };

    let accounts_repo = PgAccountsRepository::new(pool.clone());

    // Access-token gate shared by the catalog and orders routers
    let mw_state = AccountsMiddlewareState {
        repo: Arc::new(accounts_repo.clone()),
        config: Arc::new(accounts_config.clone()),
    };
    let require_account_layer =
        middleware::from_fn(move |req, next| require_account(mw_state.clone(), req, next));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/accounts",
            accounts_router(accounts_repo, accounts_config),
        )
        .nest(
            "/api/products",
            catalog_router(PgCatalogRepository::new(pool.clone()))
                .layer(require_account_layer.clone()),
        )
        .nest(
            "/api/orders",
            orders_router(PgOrdersRepository::new(pool.clone())).layer(require_account_layer),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
