//! Cart endpoints: add, view, line updates, removal.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use common::{CartItemId, ProductId};
use domain::{CartAction, CartLine, CartView, Money};
use serde::{Deserialize, Serialize};
use shop_store::ShopStore;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

use super::parse_uuid;

// -- Request types --

#[derive(Deserialize)]
pub struct UpdateForm {
    pub action: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct AddToCartResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_count: Option<i64>,
    pub message: String,
}

#[derive(Serialize)]
pub struct CartLineResponse {
    pub item_id: String,
    pub product_id: String,
    pub product_name: String,
    pub price_cents: i64,
    pub price: String,
    pub quantity: i64,
    pub subtotal_cents: i64,
    pub subtotal: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            item_id: line.item.id.to_string(),
            product_id: line.product.id.to_string(),
            product_name: line.product.name,
            price_cents: line.product.price_cents,
            price: Money::from_cents(line.product.price_cents).to_string(),
            quantity: line.item.quantity,
            subtotal_cents: line.subtotal.cents(),
            subtotal: line.subtotal.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_cents: i64,
    pub total: String,
    pub cart_count: i64,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            lines: view.lines.into_iter().map(Into::into).collect(),
            total_cents: view.total.cents(),
            total: view.total.to_string(),
            cart_count: view.cart_count,
        }
    }
}

// -- Handlers --

/// POST /cart/add/{product_id}/ — adds one unit, reporting the outcome.
#[tracing::instrument(skip(state))]
pub async fn add<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> Result<Json<AddToCartResponse>, ApiError> {
    let id = ProductId::from_uuid(parse_uuid(&product_id, "product id")?);
    let outcome = state.cart.add_to_cart(user.id, id).await?;
    Ok(Json(AddToCartResponse {
        success: outcome.success,
        cart_count: outcome.cart_count,
        message: outcome.message,
    }))
}

/// GET /cart/ — the cart page: lines, totals, count.
#[tracing::instrument(skip(state))]
pub async fn view<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
) -> Result<Json<CartResponse>, ApiError> {
    let page = state.cart.cart_page(user.id).await?;
    Ok(Json(page.into()))
}

/// POST /cart/update/{item_id}/ — applies `increase`/`decrease` to one
/// line. Unknown actions change nothing; every outcome lands back on
/// the cart page.
#[tracing::instrument(skip(state, form))]
pub async fn update<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
    Path(item_id): Path<String>,
    Form(form): Form<UpdateForm>,
) -> Result<Redirect, ApiError> {
    let id = CartItemId::from_uuid(parse_uuid(&item_id, "cart item id")?);
    if let Ok(action) = form.action.parse::<CartAction>() {
        state.cart.update_item(user.id, id, action).await?;
    }
    Ok(Redirect::to("/cart/"))
}

/// POST /cart/remove/{item_id}/ — drops one line.
#[tracing::instrument(skip(state))]
pub async fn remove<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
    Path(item_id): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = CartItemId::from_uuid(parse_uuid(&item_id, "cart item id")?);
    state.cart.remove_item(user.id, id).await?;
    Ok(Redirect::to("/cart/"))
}
