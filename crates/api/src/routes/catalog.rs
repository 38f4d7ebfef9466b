//! Catalog browsing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use common::ProductId;
use domain::Money;
use serde::{Deserialize, Serialize};
use shop_store::{Category, Product, ProductSort, ShopStore};

use crate::error::ApiError;
use crate::state::AppState;

use super::parse_uuid;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub sort: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub price: String,
    pub stock: i64,
    pub rating: f64,
    pub category_id: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price_cents: product.price_cents,
            price: Money::from_cents(product.price_cents).to_string(),
            stock: product.stock,
            rating: product.rating,
            category_id: product.category_id.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            slug: category.slug,
        }
    }
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub products: Vec<ProductResponse>,
}

#[derive(Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub categories: Vec<CategoryResponse>,
}

// -- Handlers --

/// GET / — the first products in catalog order.
#[tracing::instrument(skip(state))]
pub async fn home<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<HomeResponse>, ApiError> {
    let products = state.catalog.home_page().await?;
    Ok(Json(HomeResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// GET /products/ — filtered and sorted products plus every category.
#[tracing::instrument(skip(state))]
pub async fn list<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductListResponse>, ApiError> {
    // An unrecognized sort value leaves the listing in its default order.
    let sort = params
        .sort
        .as_deref()
        .and_then(|raw| raw.parse::<ProductSort>().ok());

    let listing = state
        .catalog
        .product_list(params.category.as_deref(), sort)
        .await?;

    Ok(Json(ProductListResponse {
        products: listing.products.into_iter().map(Into::into).collect(),
        categories: listing.categories.into_iter().map(Into::into).collect(),
    }))
}

/// GET /products/{product_id}/ — one product, 404 when missing.
#[tracing::instrument(skip(state))]
pub async fn detail<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = ProductId::from_uuid(parse_uuid(&product_id, "product id")?);
    let product = state.catalog.product_detail(id).await?;
    Ok(Json(product.into()))
}
