//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Order, OrderDetail, OrderItem, Payment, Shipment};
use crate::domain::repository::OrderRepository;
use crate::error::OrdersResult;

const ORDER_COLUMNS: &str = "order_id, order_number, account_id, shipping_address_id, \
     discount_id, subtotal_amount, discount_amount, total_amount, status, payment_status, \
     notes, placed_at, updated_at";

/// PostgreSQL-backed orders repository
#[derive(Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for PgOrdersRepository {
    async fn list_orders(&self, account_id: Uuid) -> OrdersResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE account_id = $1 ORDER BY placed_at DESC"
        ))
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderRow::into_order).collect())
    }

    async fn find_order_detail(
        &self,
        order_id: Uuid,
        account_id: Uuid,
    ) -> OrdersResult<Option<OrderDetail>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1 AND account_id = $2"
        ))
        .bind(order_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let order = row.into_order();

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT order_item_id, order_id, product_id, product_name, unit_price,
                   quantity, total_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY product_name
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        let payments = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, order_id, transaction_id, method, amount, status,
                   gateway_response, refund_amount, refunded_at, masked_card_number,
                   created_at
            FROM payments
            WHERE order_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        let shipments = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT shipment_id, order_id, tracking_number, courier, status, notes,
                   delivered_to, delivered_at, created_at
            FROM shipments
            WHERE order_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderDetail {
            order,
            items: items.into_iter().map(OrderItemRow::into_item).collect(),
            payments: payments.into_iter().map(PaymentRow::into_payment).collect(),
            shipments: shipments
                .into_iter()
                .map(ShipmentRow::into_shipment)
                .collect(),
        }))
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    order_number: String,
    account_id: Uuid,
    shipping_address_id: Option<Uuid>,
    discount_id: Option<Uuid>,
    subtotal_amount: Decimal,
    discount_amount: Decimal,
    total_amount: Decimal,
    status: String,
    payment_status: String,
    notes: Option<String>,
    placed_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Order {
        Order {
            order_id: self.order_id,
            order_number: self.order_number,
            account_id: self.account_id,
            shipping_address_id: self.shipping_address_id,
            discount_id: self.discount_id,
            subtotal_amount: self.subtotal_amount,
            discount_amount: self.discount_amount,
            total_amount: self.total_amount,
            status: self.status,
            payment_status: self.payment_status,
            notes: self.notes,
            placed_at: self.placed_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_item_id: Uuid,
    order_id: Uuid,
    product_id: Option<Uuid>,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
    total_price: Decimal,
}

impl OrderItemRow {
    fn into_item(self) -> OrderItem {
        OrderItem {
            order_item_id: self.order_item_id,
            order_id: self.order_id,
            product_id: self.product_id,
            product_name: self.product_name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            total_price: self.total_price,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    order_id: Uuid,
    transaction_id: String,
    method: String,
    amount: Decimal,
    status: String,
    gateway_response: Option<String>,
    refund_amount: Option<Decimal>,
    refunded_at: Option<DateTime<Utc>>,
    masked_card_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> Payment {
        Payment {
            payment_id: self.payment_id,
            order_id: self.order_id,
            transaction_id: self.transaction_id,
            method: self.method,
            amount: self.amount,
            status: self.status,
            gateway_response: self.gateway_response,
            refund_amount: self.refund_amount,
            refunded_at: self.refunded_at,
            masked_card_number: self.masked_card_number,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ShipmentRow {
    shipment_id: Uuid,
    order_id: Uuid,
    tracking_number: Option<String>,
    courier: Option<String>,
    status: String,
    notes: Option<String>,
    delivered_to: Option<String>,
    delivered_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ShipmentRow {
    fn into_shipment(self) -> Shipment {
        Shipment {
            shipment_id: self.shipment_id,
            order_id: self.order_id,
            tracking_number: self.tracking_number,
            courier: self.courier,
            status: self.status,
            notes: self.notes,
            delivered_to: self.delivered_to,
            delivered_at: self.delivered_at,
            created_at: self.created_at,
        }
    }
}
