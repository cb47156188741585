//! PostgreSQL Repository Implementations

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    Cart, CartItem, CartStatus, Category, CategoryChanges, Comment, CommentChanges, Discount,
    DiscountChanges, Product, ProductChanges, cart_subtotal, vote_deltas, vote_transition,
    VoteTransition,
};
use crate::domain::repository::{
    CartRepository, CategoryRepository, CommentRepository, DiscountRepository, ProductRepository,
};
use crate::error::{CatalogError, CatalogResult};

const CART_TTL_DAYS: i64 = 7;

const PRODUCT_COLUMNS: &str = "product_id, category_id, name, description, brand, price, \
     weight_kg, is_active, created_at, updated_at";

const CATEGORY_COLUMNS: &str = "category_id, parent_id, name, slug, icon_url, banner_url, \
     is_active, display_order, created_at, updated_at";

const CART_COLUMNS: &str = "cart_id, account_id, status, items, subtotal_amount, total_amount, \
     expires_at, created_at, updated_at";

const COMMENT_COLUMNS: &str = "comment_id, product_id, account_id, content, rating, is_approved, \
     is_verified_purchase, helpful_count, unhelpful_count, created_at, updated_at";

const DISCOUNT_COLUMNS: &str = "discount_id, code, percent, starts_at, ends_at, is_active, \
     created_by, created_at, updated_at";

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

impl ProductRepository for PgCatalogRepository {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn find_product(&self, product_id: Uuid) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn create_product(&self, changes: &ProductChanges) -> CatalogResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (product_id, category_id, name, description, brand,
                                  price, weight_kg, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(changes.category_id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.brand)
        .bind(changes.price)
        .bind(changes.weight_kg)
        .bind(changes.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        changes: &ProductChanges,
    ) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET category_id = $2, name = $3, description = $4, brand = $5,
                price = $6, weight_kg = $7, is_active = $8, updated_at = now()
            WHERE product_id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(changes.category_id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.brand)
        .bind(changes.price)
        .bind(changes.weight_kg)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn delete_product(&self, product_id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl CategoryRepository for PgCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY display_order, name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn find_category(&self, category_id: Uuid) -> CatalogResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE category_id = $1"
        ))
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn create_category(&self, changes: &CategoryChanges) -> CatalogResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            INSERT INTO categories (category_id, parent_id, name, slug, icon_url,
                                    banner_url, is_active, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(changes.parent_id)
        .bind(&changes.name)
        .bind(&changes.slug)
        .bind(&changes.icon_url)
        .bind(&changes.banner_url)
        .bind(changes.is_active)
        .bind(changes.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::validation("slug", "A category with this slug already exists")
            } else {
                e.into()
            }
        })?;

        Ok(row.into_category())
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        changes: &CategoryChanges,
    ) -> CatalogResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            UPDATE categories
            SET parent_id = $2, name = $3, slug = $4, icon_url = $5, banner_url = $6,
                is_active = $7, display_order = $8, updated_at = now()
            WHERE category_id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(category_id)
        .bind(changes.parent_id)
        .bind(&changes.name)
        .bind(&changes.slug)
        .bind(&changes.icon_url)
        .bind(&changes.banner_url)
        .bind(changes.is_active)
        .bind(changes.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::validation("slug", "A category with this slug already exists")
            } else {
                e.into()
            }
        })?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn delete_category(&self, category_id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl CartRepository for PgCatalogRepository {
    async fn get_or_create_cart(&self, account_id: Uuid) -> CatalogResult<Cart> {
        let mut tx = self.pool.begin().await?;
        let cart = fetch_or_create_cart(&mut tx, account_id).await?;
        tx.commit().await?;
        Ok(cart)
    }

    async fn add_cart_item(
        &self,
        account_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> CatalogResult<Cart> {
        let mut tx = self.pool.begin().await?;

        let price = sqlx::query_scalar::<_, Decimal>(
            "SELECT price FROM products WHERE product_id = $1 AND is_active",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CatalogError::NotFound("Product"))?;

        let mut cart = fetch_or_create_cart(&mut tx, account_id).await?;

        // Same product folds into one line, at the already-snapshotted price
        match cart.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity += quantity,
            None => cart.items.push(CartItem {
                product_id,
                quantity,
                unit_price: price,
            }),
        }

        let cart = store_cart_items(&mut tx, cart).await?;
        tx.commit().await?;

        tracing::debug!(cart_id = %cart.cart_id, %product_id, quantity, "Cart item added");
        Ok(cart)
    }

    async fn remove_cart_item(&self, account_id: Uuid, product_id: Uuid) -> CatalogResult<Cart> {
        let mut tx = self.pool.begin().await?;
        let mut cart = fetch_or_create_cart(&mut tx, account_id).await?;

        let before = cart.items.len();
        cart.items.retain(|i| i.product_id != product_id);
        if cart.items.len() == before {
            return Err(CatalogError::NotFound("Cart item"));
        }

        let cart = store_cart_items(&mut tx, cart).await?;
        tx.commit().await?;

        Ok(cart)
    }
}

/// Select the live active cart with a row lock, creating one when absent
async fn fetch_or_create_cart(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    account_id: Uuid,
) -> CatalogResult<Cart> {
    let row = sqlx::query_as::<_, CartRow>(&format!(
        r#"
        SELECT {CART_COLUMNS} FROM carts
        WHERE account_id = $1 AND status = 'active' AND expires_at > now()
        FOR UPDATE
        "#
    ))
    .bind(account_id)
    .fetch_optional(&mut **tx)
    .await?;

    if let Some(row) = row {
        return row.into_cart();
    }

    let expires_at = Utc::now() + Duration::days(CART_TTL_DAYS);
    let row = sqlx::query_as::<_, CartRow>(&format!(
        r#"
        INSERT INTO carts (cart_id, account_id, status, items, subtotal_amount,
                           total_amount, expires_at)
        VALUES ($1, $2, 'active', '[]'::jsonb, 0, 0, $3)
        RETURNING {CART_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(expires_at)
    .fetch_one(&mut **tx)
    .await?;

    row.into_cart()
}

async fn store_cart_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    mut cart: Cart,
) -> CatalogResult<Cart> {
    cart.subtotal_amount = cart_subtotal(&cart.items);
    cart.total_amount = cart.subtotal_amount;

    sqlx::query(
        r#"
        UPDATE carts
        SET items = $2, subtotal_amount = $3, total_amount = $4, updated_at = now()
        WHERE cart_id = $1
        "#,
    )
    .bind(cart.cart_id)
    .bind(serde_json::to_value(&cart.items)?)
    .bind(cart.subtotal_amount)
    .bind(cart.total_amount)
    .execute(&mut **tx)
    .await?;

    Ok(cart)
}

impl CommentRepository for PgCatalogRepository {
    async fn list_comments(&self, product_id: Uuid) -> CatalogResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS} FROM comments
            WHERE product_id = $1 AND is_approved
            ORDER BY created_at DESC
            "#
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn create_comment(
        &self,
        product_id: Uuid,
        account_id: Uuid,
        changes: &CommentChanges,
    ) -> CatalogResult<Comment> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE product_id = $1)")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(CatalogError::NotFound("Product"));
        }

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            INSERT INTO comments (comment_id, product_id, account_id, content, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(product_id)
        .bind(account_id)
        .bind(&changes.content)
        .bind(changes.rating)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn update_comment(
        &self,
        comment_id: Uuid,
        account_id: Uuid,
        changes: &CommentChanges,
    ) -> CatalogResult<Option<Comment>> {
        // Edits go back through moderation
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            UPDATE comments
            SET content = $3, rating = $4, is_approved = false, updated_at = now()
            WHERE comment_id = $1 AND account_id = $2
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment_id)
        .bind(account_id)
        .bind(&changes.content)
        .bind(changes.rating)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn delete_comment(&self, comment_id: Uuid, account_id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1 AND account_id = $2")
            .bind(comment_id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn vote_comment(
        &self,
        comment_id: Uuid,
        account_id: Uuid,
        is_helpful: bool,
    ) -> CatalogResult<Comment> {
        let mut tx = self.pool.begin().await?;

        // Lock the comment row so concurrent votes serialize
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT comment_id FROM comments WHERE comment_id = $1 FOR UPDATE",
        )
        .bind(comment_id)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Err(CatalogError::NotFound("Comment"));
        }

        let existing = sqlx::query_scalar::<_, bool>(
            "SELECT is_helpful FROM comment_votes WHERE comment_id = $1 AND account_id = $2",
        )
        .bind(comment_id)
        .bind(account_id)
        .fetch_optional(&mut *tx)
        .await?;

        let transition = vote_transition(existing, is_helpful);
        match transition {
            VoteTransition::Added => {
                sqlx::query(
                    r#"
                    INSERT INTO comment_votes (comment_id, account_id, is_helpful)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(comment_id)
                .bind(account_id)
                .bind(is_helpful)
                .execute(&mut *tx)
                .await?;
            }
            VoteTransition::Switched => {
                sqlx::query(
                    r#"
                    UPDATE comment_votes
                    SET is_helpful = $3, updated_at = now()
                    WHERE comment_id = $1 AND account_id = $2
                    "#,
                )
                .bind(comment_id)
                .bind(account_id)
                .bind(is_helpful)
                .execute(&mut *tx)
                .await?;
            }
            VoteTransition::Removed => {
                sqlx::query(
                    "DELETE FROM comment_votes WHERE comment_id = $1 AND account_id = $2",
                )
                .bind(comment_id)
                .bind(account_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        let (helpful_delta, unhelpful_delta) = vote_deltas(transition, is_helpful);
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            UPDATE comments
            SET helpful_count = helpful_count + $2,
                unhelpful_count = unhelpful_count + $3,
                updated_at = now()
            WHERE comment_id = $1
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment_id)
        .bind(helpful_delta)
        .bind(unhelpful_delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_comment())
    }
}

impl DiscountRepository for PgCatalogRepository {
    async fn list_discounts(&self) -> CatalogResult<Vec<Discount>> {
        let rows = sqlx::query_as::<_, DiscountRow>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM discounts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DiscountRow::into_discount).collect())
    }

    async fn find_discount(&self, discount_id: Uuid) -> CatalogResult<Option<Discount>> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM discounts WHERE discount_id = $1"
        ))
        .bind(discount_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DiscountRow::into_discount))
    }

    async fn create_discount(
        &self,
        created_by: Uuid,
        changes: &DiscountChanges,
    ) -> CatalogResult<Discount> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            r#"
            INSERT INTO discounts (discount_id, code, percent, starts_at, ends_at,
                                   is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {DISCOUNT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&changes.code)
        .bind(changes.percent)
        .bind(changes.starts_at)
        .bind(changes.ends_at)
        .bind(changes.is_active)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::validation("code", "A discount with this code already exists")
            } else {
                e.into()
            }
        })?;

        Ok(row.into_discount())
    }

    async fn update_discount(
        &self,
        discount_id: Uuid,
        changes: &DiscountChanges,
    ) -> CatalogResult<Option<Discount>> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            r#"
            UPDATE discounts
            SET code = $2, percent = $3, starts_at = $4, ends_at = $5, is_active = $6,
                updated_at = now()
            WHERE discount_id = $1
            RETURNING {DISCOUNT_COLUMNS}
            "#
        ))
        .bind(discount_id)
        .bind(&changes.code)
        .bind(changes.percent)
        .bind(changes.starts_at)
        .bind(changes.ends_at)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::validation("code", "A discount with this code already exists")
            } else {
                e.into()
            }
        })?;

        Ok(row.map(DiscountRow::into_discount))
    }

    async fn delete_discount(&self, discount_id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM discounts WHERE discount_id = $1")
            .bind(discount_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    category_id: Option<Uuid>,
    name: String,
    description: Option<String>,
    brand: Option<String>,
    price: Decimal,
    weight_kg: Option<Decimal>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            product_id: self.product_id,
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            brand: self.brand,
            price: self.price,
            weight_kg: self.weight_kg,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    parent_id: Option<Uuid>,
    name: String,
    slug: String,
    icon_url: Option<String>,
    banner_url: Option<String>,
    is_active: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: self.category_id,
            parent_id: self.parent_id,
            name: self.name,
            slug: self.slug,
            icon_url: self.icon_url,
            banner_url: self.banner_url,
            is_active: self.is_active,
            display_order: self.display_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CartRow {
    cart_id: Uuid,
    account_id: Uuid,
    status: String,
    items: serde_json::Value,
    subtotal_amount: Decimal,
    total_amount: Decimal,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CartRow {
    fn into_cart(self) -> CatalogResult<Cart> {
        Ok(Cart {
            cart_id: self.cart_id,
            account_id: self.account_id,
            status: CartStatus::from_db(&self.status),
            items: serde_json::from_value(self.items)?,
            subtotal_amount: self.subtotal_amount,
            total_amount: self.total_amount,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    product_id: Uuid,
    account_id: Uuid,
    content: String,
    rating: i16,
    is_approved: bool,
    is_verified_purchase: bool,
    helpful_count: i32,
    unhelpful_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: self.comment_id,
            product_id: self.product_id,
            account_id: self.account_id,
            content: self.content,
            rating: self.rating,
            is_approved: self.is_approved,
            is_verified_purchase: self.is_verified_purchase,
            helpful_count: self.helpful_count,
            unhelpful_count: self.unhelpful_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DiscountRow {
    discount_id: Uuid,
    code: String,
    percent: Decimal,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    is_active: bool,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DiscountRow {
    fn into_discount(self) -> Discount {
        Discount {
            discount_id: self.discount_id,
            code: self.code,
            percent: self.percent,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            is_active: self.is_active,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
