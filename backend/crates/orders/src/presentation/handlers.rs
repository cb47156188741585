//! HTTP Handlers
//!
//! Both routes sit behind the accounts `require_account` middleware.

use axum::Json;
use axum::extract::{Extension, Path, State};
use std::sync::Arc;
use uuid::Uuid;

use accounts::CurrentAccount;

use crate::domain::repository::OrderRepository;
use crate::error::{OrdersError, OrdersResult};
use crate::presentation::dto::{OrderDetailResponse, OrderResponse};

/// Shared state for orders handlers
#[derive(Clone)]
pub struct OrdersAppState<R>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/orders
pub async fn list_orders<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> OrdersResult<Json<Vec<OrderResponse>>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let orders = state.repo.list_orders(current.account_id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /api/orders/{order_id}
pub async fn get_order<R>(
    State(state): State<OrdersAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(order_id): Path<Uuid>,
) -> OrdersResult<Json<OrderDetailResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let detail = state
        .repo
        .find_order_detail(order_id, current.account_id)
        .await?
        .ok_or(OrdersError::NotFound("Order"))?;
    Ok(Json(OrderDetailResponse::from(detail)))
}
