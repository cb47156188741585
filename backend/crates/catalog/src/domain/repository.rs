//! Repository Traits
//!
//! Interfaces for catalog data access. The Postgres implementation lives
//! in `infra::postgres`.

use uuid::Uuid;

use crate::domain::entity::{
    Cart, Category, CategoryChanges, Comment, CommentChanges, Discount, DiscountChanges, Product,
    ProductChanges,
};
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    async fn find_product(&self, product_id: Uuid) -> CatalogResult<Option<Product>>;

    async fn create_product(&self, changes: &ProductChanges) -> CatalogResult<Product>;

    /// Returns None if the product does not exist
    async fn update_product(
        &self,
        product_id: Uuid,
        changes: &ProductChanges,
    ) -> CatalogResult<Option<Product>>;

    /// Returns false if the product did not exist
    async fn delete_product(&self, product_id: Uuid) -> CatalogResult<bool>;
}

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    async fn find_category(&self, category_id: Uuid) -> CatalogResult<Option<Category>>;

    async fn create_category(&self, changes: &CategoryChanges) -> CatalogResult<Category>;

    async fn update_category(
        &self,
        category_id: Uuid,
        changes: &CategoryChanges,
    ) -> CatalogResult<Option<Category>>;

    async fn delete_category(&self, category_id: Uuid) -> CatalogResult<bool>;
}

/// Cart repository trait
///
/// One active cart per account; expired and checked-out carts are left
/// behind and a fresh one is created on the next access.
#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    /// Find the account's live active cart or create one
    async fn get_or_create_cart(&self, account_id: Uuid) -> CatalogResult<Cart>;

    /// Append an item; fails with `NotFound("Product")` for unknown ids
    async fn add_cart_item(
        &self,
        account_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> CatalogResult<Cart>;

    /// Remove all items matching the product; fails with
    /// `NotFound("Cart item")` when nothing matched
    async fn remove_cart_item(&self, account_id: Uuid, product_id: Uuid) -> CatalogResult<Cart>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Approved comments for a product, newest first
    async fn list_comments(&self, product_id: Uuid) -> CatalogResult<Vec<Comment>>;

    /// New comments start unapproved and not verified-purchase
    async fn create_comment(
        &self,
        product_id: Uuid,
        account_id: Uuid,
        changes: &CommentChanges,
    ) -> CatalogResult<Comment>;

    /// Owner-scoped update; editing resets the approval flag
    async fn update_comment(
        &self,
        comment_id: Uuid,
        account_id: Uuid,
        changes: &CommentChanges,
    ) -> CatalogResult<Option<Comment>>;

    /// Owner-scoped delete
    async fn delete_comment(&self, comment_id: Uuid, account_id: Uuid) -> CatalogResult<bool>;

    /// Apply a helpful/unhelpful vote with toggle-off and switch
    /// semantics, updating the counters in the same transaction
    async fn vote_comment(
        &self,
        comment_id: Uuid,
        account_id: Uuid,
        is_helpful: bool,
    ) -> CatalogResult<Comment>;
}

/// Discount repository trait
#[trait_variant::make(DiscountRepository: Send)]
pub trait LocalDiscountRepository {
    async fn list_discounts(&self) -> CatalogResult<Vec<Discount>>;

    async fn find_discount(&self, discount_id: Uuid) -> CatalogResult<Option<Discount>>;

    async fn create_discount(
        &self,
        created_by: Uuid,
        changes: &DiscountChanges,
    ) -> CatalogResult<Discount>;

    async fn update_discount(
        &self,
        discount_id: Uuid,
        changes: &DiscountChanges,
    ) -> CatalogResult<Option<Discount>>;

    async fn delete_discount(&self, discount_id: Uuid) -> CatalogResult<bool>;
}
