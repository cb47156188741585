//! Catalog Router
//!
//! The authentication middleware is applied by the composing
//! application, not here; every route expects a `CurrentAccount`
//! extension.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState, CatalogRepo};

/// Create the catalog router with the PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository) -> Router {
    catalog_router_generic(repo)
}

/// Create a generic catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R) -> Router
where
    R: CatalogRepo,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route(
            "/categories",
            get(handlers::list_categories::<R>).post(handlers::create_category::<R>),
        )
        .route(
            "/categories/{category_id}",
            get(handlers::get_category::<R>)
                .put(handlers::update_category::<R>)
                .delete(handlers::delete_category::<R>),
        )
        .route("/cart", get(handlers::get_cart::<R>))
        .route("/cart/items", post(handlers::add_cart_item::<R>))
        .route(
            "/cart/items/{product_id}",
            delete(handlers::remove_cart_item::<R>),
        )
        .route(
            "/comments/{comment_id}",
            put(handlers::update_comment::<R>).delete(handlers::delete_comment::<R>),
        )
        .route(
            "/comments/{comment_id}/vote",
            post(handlers::vote_comment::<R>),
        )
        .route(
            "/discounts",
            get(handlers::list_discounts::<R>).post(handlers::create_discount::<R>),
        )
        .route(
            "/discounts/{discount_id}",
            put(handlers::update_discount::<R>).delete(handlers::delete_discount::<R>),
        )
        .route(
            "/{product_id}",
            get(handlers::get_product::<R>)
                .put(handlers::update_product::<R>)
                .delete(handlers::delete_product::<R>),
        )
        .route(
            "/{product_id}/comments",
            get(handlers::list_comments::<R>).post(handlers::create_comment::<R>),
        )
        .with_state(state)
}
