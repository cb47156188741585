//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entity::{Order, OrderDetail, OrderItem, Payment, Shipment};

/// Order summary for list responses
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub order_number: String,
    pub subtotal_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub placed_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            order_id: o.order_id,
            order_number: o.order_number,
            subtotal_amount: o.subtotal_amount,
            discount_amount: o.discount_amount,
            total_amount: o.total_amount,
            status: o.status,
            payment_status: o.payment_status,
            notes: o.notes,
            placed_at: o.placed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(i: OrderItem) -> Self {
        Self {
            product_id: i.product_id,
            product_name: i.product_name,
            unit_price: i.unit_price,
            quantity: i.quantity,
            total_price: i.total_price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub transaction_id: String,
    pub method: String,
    pub amount: Decimal,
    pub status: String,
    pub refund_amount: Option<Decimal>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub masked_card_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            transaction_id: p.transaction_id,
            method: p.method,
            amount: p.amount,
            status: p.status,
            refund_amount: p.refund_amount,
            refunded_at: p.refunded_at,
            masked_card_number: p.masked_card_number,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipmentResponse {
    pub tracking_number: Option<String>,
    pub courier: Option<String>,
    pub status: String,
    pub delivered_to: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Shipment> for ShipmentResponse {
    fn from(s: Shipment) -> Self {
        Self {
            tracking_number: s.tracking_number,
            courier: s.courier,
            status: s.status,
            delivered_to: s.delivered_to,
            delivered_at: s.delivered_at,
            created_at: s.created_at,
        }
    }
}

/// Full order detail for GET /api/orders/{order_id}
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    pub payments: Vec<PaymentResponse>,
    pub shipments: Vec<ShipmentResponse>,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(d: OrderDetail) -> Self {
        Self {
            order: OrderResponse::from(d.order),
            items: d.items.into_iter().map(OrderItemResponse::from).collect(),
            payments: d.payments.into_iter().map(PaymentResponse::from).collect(),
            shipments: d
                .shipments
                .into_iter()
                .map(ShipmentResponse::from)
                .collect(),
        }
    }
}
