//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Cart, CartItem, CartStatus, Category, Comment, Discount, Product};

/// Request body for product create/update
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub weight_kg: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Product projection
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Decimal,
    pub weight_kg: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            category_id: p.category_id,
            name: p.name,
            description: p.description,
            brand: p.brand,
            price: p.price,
            weight_kg: p.weight_kg,
            is_active: p.is_active,
            created_at: p.created_at,
        }
    }
}

/// Request body for category create/update
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// Category projection
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub category_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            category_id: c.category_id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            icon_url: c.icon_url,
            banner_url: c.banner_url,
            is_active: c.is_active,
            display_order: c.display_order,
        }
    }
}

/// Request for POST /cart/items
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Cart projection
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub cart_id: Uuid,
    pub status: CartStatus,
    pub items: Vec<CartItem>,
    pub subtotal_amount: Decimal,
    pub total_amount: Decimal,
    pub expires_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            cart_id: cart.cart_id,
            status: cart.status,
            items: cart.items,
            subtotal_amount: cart.subtotal_amount,
            total_amount: cart.total_amount,
            expires_at: cart.expires_at,
        }
    }
}

/// Request body for comment create/update
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub content: String,
    pub rating: i16,
}

/// Request for POST /comments/{comment_id}/vote
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub is_helpful: bool,
}

/// Comment projection
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub comment_id: Uuid,
    pub product_id: Uuid,
    pub account_id: Uuid,
    pub content: String,
    pub rating: i16,
    pub is_approved: bool,
    pub is_verified_purchase: bool,
    pub helpful_count: i32,
    pub unhelpful_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            comment_id: c.comment_id,
            product_id: c.product_id,
            account_id: c.account_id,
            content: c.content,
            rating: c.rating,
            is_approved: c.is_approved,
            is_verified_purchase: c.is_verified_purchase,
            helpful_count: c.helpful_count,
            unhelpful_count: c.unhelpful_count,
            created_at: c.created_at,
        }
    }
}

/// Request body for discount create/update
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountRequest {
    pub code: String,
    pub percent: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Discount projection
#[derive(Debug, Clone, Serialize)]
pub struct DiscountResponse {
    pub discount_id: Uuid,
    pub code: String,
    pub percent: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_by: Uuid,
}

impl From<Discount> for DiscountResponse {
    fn from(d: Discount) -> Self {
        Self {
            discount_id: d.discount_id,
            code: d.code,
            percent: d.percent,
            starts_at: d.starts_at,
            ends_at: d.ends_at,
            is_active: d.is_active,
            created_by: d.created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_response_shape() {
        let cart = Cart {
            cart_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            status: CartStatus::Active,
            items: vec![CartItem {
                product_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: Decimal::new(999, 2),
            }],
            subtotal_amount: Decimal::new(1998, 2),
            total_amount: Decimal::new(1998, 2),
            expires_at: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(CartResponse::from(cart)).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert!(json.get("account_id").is_none());
    }

    #[test]
    fn test_add_cart_item_defaults_quantity() {
        let req: AddCartItemRequest = serde_json::from_value(serde_json::json!({
            "product_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert_eq!(req.quantity, 1);
    }
}
