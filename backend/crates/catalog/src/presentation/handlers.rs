//! HTTP Handlers
//!
//! All catalog routes sit behind the accounts `require_account`
//! middleware, so every handler can rely on the [`CurrentAccount`]
//! extension being present.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use accounts::CurrentAccount;

use crate::domain::entity::{
    CategoryChanges, CommentChanges, DiscountChanges, ProductChanges,
};
use crate::domain::repository::{
    CartRepository, CategoryRepository, CommentRepository, DiscountRepository, ProductRepository,
};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    AddCartItemRequest, CartResponse, CategoryRequest, CategoryResponse, CommentRequest,
    CommentResponse, DiscountRequest, DiscountResponse, ProductRequest, ProductResponse,
    VoteRequest,
};

/// Everything the catalog handlers need from a repository, in one bound.
pub trait CatalogRepo:
    ProductRepository
    + CategoryRepository
    + CartRepository
    + CommentRepository
    + DiscountRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> CatalogRepo for T where
    T: ProductRepository
        + CategoryRepository
        + CartRepository
        + CommentRepository
        + DiscountRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CatalogRepo,
{
    pub repo: Arc<R>,
}

fn require_admin(current: &CurrentAccount) -> CatalogResult<()> {
    if current.is_admin() {
        Ok(())
    } else {
        Err(CatalogError::AdminOnly)
    }
}

fn product_changes(req: ProductRequest) -> CatalogResult<ProductChanges> {
    if req.name.trim().is_empty() {
        return Err(CatalogError::validation("name", "Name is required"));
    }
    if req.price.is_sign_negative() {
        return Err(CatalogError::validation("price", "Price cannot be negative"));
    }
    Ok(ProductChanges {
        category_id: req.category_id,
        name: req.name,
        description: req.description,
        brand: req.brand,
        price: req.price,
        weight_kg: req.weight_kg,
        is_active: req.is_active,
    })
}

/// GET /api/products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    R: CatalogRepo,
{
    let products = state.repo.list_products().await?;
    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// POST /api/products (admin)
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    let product = state.repo.create_product(&product_changes(req)?).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// GET /api/products/{product_id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(product_id): Path<Uuid>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: CatalogRepo,
{
    let product = state
        .repo
        .find_product(product_id)
        .await?
        .ok_or(CatalogError::NotFound("Product"))?;
    Ok(Json(ProductResponse::from(product)))
}

/// PUT /api/products/{product_id} (admin)
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    let product = state
        .repo
        .update_product(product_id, &product_changes(req)?)
        .await?
        .ok_or(CatalogError::NotFound("Product"))?;
    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /api/products/{product_id} (admin)
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(product_id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    if !state.repo.delete_product(product_id).await? {
        return Err(CatalogError::NotFound("Product"));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn category_changes(req: CategoryRequest) -> CatalogResult<CategoryChanges> {
    if req.slug.trim().is_empty() {
        return Err(CatalogError::validation("slug", "Slug is required"));
    }
    Ok(CategoryChanges {
        parent_id: req.parent_id,
        name: req.name,
        slug: req.slug,
        icon_url: req.icon_url,
        banner_url: req.banner_url,
        is_active: req.is_active,
        display_order: req.display_order,
    })
}

/// GET /api/products/categories
pub async fn list_categories<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<CategoryResponse>>>
where
    R: CatalogRepo,
{
    let categories = state.repo.list_categories().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// POST /api/products/categories (admin)
pub async fn create_category<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<CategoryRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    let category = state.repo.create_category(&category_changes(req)?).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// GET /api/products/categories/{category_id}
pub async fn get_category<R>(
    State(state): State<CatalogAppState<R>>,
    Path(category_id): Path<Uuid>,
) -> CatalogResult<Json<CategoryResponse>>
where
    R: CatalogRepo,
{
    let category = state
        .repo
        .find_category(category_id)
        .await?
        .ok_or(CatalogError::NotFound("Category"))?;
    Ok(Json(CategoryResponse::from(category)))
}

/// PUT /api/products/categories/{category_id} (admin)
pub async fn update_category<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(category_id): Path<Uuid>,
    Json(req): Json<CategoryRequest>,
) -> CatalogResult<Json<CategoryResponse>>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    let category = state
        .repo
        .update_category(category_id, &category_changes(req)?)
        .await?
        .ok_or(CatalogError::NotFound("Category"))?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /api/products/categories/{category_id} (admin)
pub async fn delete_category<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(category_id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    if !state.repo.delete_category(category_id).await? {
        return Err(CatalogError::NotFound("Category"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/products/cart
pub async fn get_cart<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> CatalogResult<Json<CartResponse>>
where
    R: CatalogRepo,
{
    let cart = state.repo.get_or_create_cart(current.account_id).await?;
    Ok(Json(CartResponse::from(cart)))
}

/// POST /api/products/cart/items
pub async fn add_cart_item<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<AddCartItemRequest>,
) -> CatalogResult<Json<CartResponse>>
where
    R: CatalogRepo,
{
    if req.quantity == 0 {
        return Err(CatalogError::validation(
            "quantity",
            "Quantity must be at least 1",
        ));
    }

    let cart = state
        .repo
        .add_cart_item(current.account_id, req.product_id, req.quantity)
        .await?;
    Ok(Json(CartResponse::from(cart)))
}

/// DELETE /api/products/cart/items/{product_id}
pub async fn remove_cart_item<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(product_id): Path<Uuid>,
) -> CatalogResult<Json<CartResponse>>
where
    R: CatalogRepo,
{
    let cart = state
        .repo
        .remove_cart_item(current.account_id, product_id)
        .await?;
    Ok(Json(CartResponse::from(cart)))
}

/// GET /api/products/{product_id}/comments
pub async fn list_comments<R>(
    State(state): State<CatalogAppState<R>>,
    Path(product_id): Path<Uuid>,
) -> CatalogResult<Json<Vec<CommentResponse>>>
where
    R: CatalogRepo,
{
    let comments = state.repo.list_comments(product_id).await?;
    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// POST /api/products/{product_id}/comments
pub async fn create_comment<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepo,
{
    let changes = CommentChanges::new(req.content, req.rating)?;
    let comment = state
        .repo
        .create_comment(product_id, current.account_id, &changes)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// PUT /api/products/comments/{comment_id} (owner)
pub async fn update_comment<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(comment_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> CatalogResult<Json<CommentResponse>>
where
    R: CatalogRepo,
{
    let changes = CommentChanges::new(req.content, req.rating)?;
    let comment = state
        .repo
        .update_comment(comment_id, current.account_id, &changes)
        .await?
        .ok_or(CatalogError::NotFound("Comment"))?;
    Ok(Json(CommentResponse::from(comment)))
}

/// DELETE /api/products/comments/{comment_id} (owner)
pub async fn delete_comment<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(comment_id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: CatalogRepo,
{
    if !state
        .repo
        .delete_comment(comment_id, current.account_id)
        .await?
    {
        return Err(CatalogError::NotFound("Comment"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/products/comments/{comment_id}/vote
pub async fn vote_comment<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(comment_id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> CatalogResult<Json<CommentResponse>>
where
    R: CatalogRepo,
{
    let comment = state
        .repo
        .vote_comment(comment_id, current.account_id, req.is_helpful)
        .await?;
    Ok(Json(CommentResponse::from(comment)))
}

fn discount_changes(req: DiscountRequest) -> CatalogResult<DiscountChanges> {
    if req.code.trim().is_empty() {
        return Err(CatalogError::validation("code", "Code is required"));
    }
    if req.ends_at <= req.starts_at {
        return Err(CatalogError::validation(
            "ends_at",
            "End date must be after the start date",
        ));
    }
    Ok(DiscountChanges {
        code: req.code,
        percent: req.percent,
        starts_at: req.starts_at,
        ends_at: req.ends_at,
        is_active: req.is_active,
    })
}

/// GET /api/products/discounts (admin)
pub async fn list_discounts<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
) -> CatalogResult<Json<Vec<DiscountResponse>>>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    let discounts = state.repo.list_discounts().await?;
    Ok(Json(
        discounts.into_iter().map(DiscountResponse::from).collect(),
    ))
}

/// POST /api/products/discounts (admin)
pub async fn create_discount<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<DiscountRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    let discount = state
        .repo
        .create_discount(current.account_id, &discount_changes(req)?)
        .await?;
    Ok((StatusCode::CREATED, Json(DiscountResponse::from(discount))))
}

/// PUT /api/products/discounts/{discount_id} (admin)
pub async fn update_discount<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(discount_id): Path<Uuid>,
    Json(req): Json<DiscountRequest>,
) -> CatalogResult<Json<DiscountResponse>>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    let discount = state
        .repo
        .update_discount(discount_id, &discount_changes(req)?)
        .await?
        .ok_or(CatalogError::NotFound("Discount"))?;
    Ok(Json(DiscountResponse::from(discount)))
}

/// DELETE /api/products/discounts/{discount_id} (admin)
pub async fn delete_discount<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(discount_id): Path<Uuid>,
) -> CatalogResult<StatusCode>
where
    R: CatalogRepo,
{
    require_admin(&current)?;
    if !state.repo.delete_discount(discount_id).await? {
        return Err(CatalogError::NotFound("Discount"));
    }
    Ok(StatusCode::NO_CONTENT)
}
