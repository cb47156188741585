//! Catalog Entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// A sellable product
#[derive(Debug, Clone)]
pub struct Product {
    pub product_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Decimal,
    pub weight_kg: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full field set for product create/update
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Decimal,
    pub weight_kg: Option<Decimal>,
    pub is_active: bool,
}

/// A product category (flat tree via `parent_id`)
#[derive(Debug, Clone)]
pub struct Category {
    pub category_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full field set for category create/update
#[derive(Debug, Clone)]
pub struct CategoryChanges {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub icon_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

/// Cart lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    Active,
    CheckedOut,
    Expired,
}

impl CartStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartStatus::Active => "active",
            CartStatus::CheckedOut => "checked_out",
            CartStatus::Expired => "expired",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "checked_out" => CartStatus::CheckedOut,
            "expired" => CartStatus::Expired,
            _ => CartStatus::Active,
        }
    }
}

/// One line in a cart; the unit price is snapshotted at add time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// An account's shopping cart; items live in one JSONB column
#[derive(Debug, Clone)]
pub struct Cart {
    pub cart_id: Uuid,
    pub account_id: Uuid,
    pub status: CartStatus,
    pub items: Vec<CartItem>,
    pub subtotal_amount: Decimal,
    pub total_amount: Decimal,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sum of `unit_price * quantity` over the items
pub fn cart_subtotal(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum()
}

/// A product review comment
#[derive(Debug, Clone)]
pub struct Comment {
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
    pub updated_at: DateTime<Utc>,
}

/// Content and rating for comment create/update
#[derive(Debug, Clone)]
pub struct CommentChanges {
    pub content: String,
    pub rating: i16,
}

impl CommentChanges {
    pub fn new(content: String, rating: i16) -> CatalogResult<Self> {
        if !(1..=5).contains(&rating) {
            return Err(CatalogError::validation(
                "rating",
                "Rating must be between 1 and 5",
            ));
        }
        if content.trim().is_empty() {
            return Err(CatalogError::validation("content", "Content is required"));
        }
        Ok(Self { content, rating })
    }
}

/// What a helpful/unhelpful vote does, given the voter's current vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No prior vote: record the new one
    Added,
    /// Prior vote of the opposite kind: flip it
    Switched,
    /// Prior vote of the same kind: toggle it off
    Removed,
}

/// Resolve the transition for a vote request against the existing vote
pub fn vote_transition(existing: Option<bool>, requested: bool) -> VoteTransition {
    match existing {
        None => VoteTransition::Added,
        Some(e) if e == requested => VoteTransition::Removed,
        Some(_) => VoteTransition::Switched,
    }
}

/// Counter deltas `(helpful, unhelpful)` for applying a transition
pub fn vote_deltas(transition: VoteTransition, requested: bool) -> (i32, i32) {
    let (own, other) = match transition {
        VoteTransition::Added => (1, 0),
        VoteTransition::Switched => (1, -1),
        VoteTransition::Removed => (-1, 0),
    };
    if requested { (own, other) } else { (other, own) }
}

/// A percentage discount code
#[derive(Debug, Clone)]
pub struct Discount {
    pub discount_id: Uuid,
    pub code: String,
    pub percent: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full field set for discount create/update
#[derive(Debug, Clone)]
pub struct DiscountChanges {
    pub code: String,
    pub percent: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_transition_new_vote() {
        assert_eq!(vote_transition(None, true), VoteTransition::Added);
        assert_eq!(vote_transition(None, false), VoteTransition::Added);
    }

    #[test]
    fn test_vote_transition_toggle_off() {
        assert_eq!(vote_transition(Some(true), true), VoteTransition::Removed);
        assert_eq!(vote_transition(Some(false), false), VoteTransition::Removed);
    }

    #[test]
    fn test_vote_transition_switch() {
        assert_eq!(vote_transition(Some(true), false), VoteTransition::Switched);
        assert_eq!(vote_transition(Some(false), true), VoteTransition::Switched);
    }

    #[test]
    fn test_vote_deltas() {
        assert_eq!(vote_deltas(VoteTransition::Added, true), (1, 0));
        assert_eq!(vote_deltas(VoteTransition::Added, false), (0, 1));
        assert_eq!(vote_deltas(VoteTransition::Switched, true), (1, -1));
        assert_eq!(vote_deltas(VoteTransition::Switched, false), (-1, 1));
        assert_eq!(vote_deltas(VoteTransition::Removed, true), (-1, 0));
        assert_eq!(vote_deltas(VoteTransition::Removed, false), (0, -1));
    }

    #[test]
    fn test_cart_subtotal() {
        let items = vec![
            CartItem {
                product_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: Decimal::new(1050, 2), // 10.50
            },
            CartItem {
                product_id: Uuid::new_v4(),
                quantity: 1,
                unit_price: Decimal::new(499, 2), // 4.99
            },
        ];
        assert_eq!(cart_subtotal(&items), Decimal::new(2599, 2));
    }

    #[test]
    fn test_comment_changes_rating_bounds() {
        assert!(CommentChanges::new("Nice".to_string(), 1).is_ok());
        assert!(CommentChanges::new("Nice".to_string(), 5).is_ok());
        assert!(CommentChanges::new("Nice".to_string(), 0).is_err());
        assert!(CommentChanges::new("Nice".to_string(), 6).is_err());
        assert!(CommentChanges::new("   ".to_string(), 3).is_err());
    }
}
