//! Orders Backend Module
//!
//! Account-scoped read access to orders, their items, payments, and
//! shipments. Order placement and payment processing live elsewhere.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{OrdersError, OrdersResult};
pub use infra::postgres::PgOrdersRepository;
pub use presentation::router::orders_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
