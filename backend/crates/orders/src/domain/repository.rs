//! Repository Traits

use uuid::Uuid;

use crate::domain::entity::{Order, OrderDetail};
use crate::error::OrdersResult;

/// Order repository trait (account-scoped reads only)
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// The account's orders, newest first
    async fn list_orders(&self, account_id: Uuid) -> OrdersResult<Vec<Order>>;

    /// One order with its items, payments, and shipments
    ///
    /// Returns None when the order does not exist or belongs to a
    /// different account.
    async fn find_order_detail(
        &self,
        order_id: Uuid,
        account_id: Uuid,
    ) -> OrdersResult<Option<OrderDetail>>;
}
