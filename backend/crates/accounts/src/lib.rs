//! Accounts Backend Module
//!
//! Phone-number based authentication and account management.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, router, middleware
//!
//! ## Security Model
//! - Registration and password reset require a fresh OTP verification
//! - The OTP challenge and verified marker are ephemeral records with
//!   server-side TTLs; expiry is enforced at read time
//! - Access tokens are short-lived and stateless; renewal tokens are
//!   long-lived and revocable through a deny-list
//! - Passwords are Argon2id hashes with an optional server-wide pepper

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountsError, AccountsResult};
pub use infra::postgres::PgAccountsRepository;
pub use presentation::middleware::CurrentAccount;
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::MemoryAccountsRepository;
    pub use crate::infra::postgres::PgAccountsRepository;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
