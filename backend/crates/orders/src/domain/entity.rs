//! Orders Entities
//!
//! Read-only projections; order placement and payment processing are
//! out of scope, so there are no write-side change structs here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// An order as placed by an account
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: Uuid,
    pub order_number: String,
    pub account_id: Uuid,
    pub shipping_address_id: Option<Uuid>,
    pub discount_id: Option<Uuid>,
    pub subtotal_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub placed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order, with the product name and price snapshotted
/// at purchase time
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

/// A payment attempt against an order
#[derive(Debug, Clone)]
pub struct Payment {
    pub payment_id: Uuid,
    pub order_id: Uuid,
    pub transaction_id: String,
    pub method: String,
    pub amount: Decimal,
    pub status: String,
    pub gateway_response: Option<String>,
    pub refund_amount: Option<Decimal>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub masked_card_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A shipment for an order
#[derive(Debug, Clone)]
pub struct Shipment {
    pub shipment_id: Uuid,
    pub order_id: Uuid,
    pub tracking_number: Option<String>,
    pub courier: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub delivered_to: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// An order with everything attached to it
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub payments: Vec<Payment>,
    pub shipments: Vec<Shipment>,
}
