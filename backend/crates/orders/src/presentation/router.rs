//! Orders Router
//!
//! Authentication middleware is applied by the composing application.

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::OrderRepository;
use crate::infra::postgres::PgOrdersRepository;
use crate::presentation::handlers::{self, OrdersAppState};

/// Create the orders router with the PostgreSQL repository
pub fn orders_router(repo: PgOrdersRepository) -> Router {
    orders_router_generic(repo)
}

/// Create a generic orders router for any repository implementation
pub fn orders_router_generic<R>(repo: R) -> Router
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let state = OrdersAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_orders::<R>))
        .route("/{order_id}", get(handlers::get_order::<R>))
        .with_state(state)
}
