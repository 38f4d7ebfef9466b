//! Checkout review, order placement, and the confirmation page.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use common::OrderId;
use domain::{DomainError, Money, OrderDetails};
use serde::{Deserialize, Serialize};
use shop_store::ShopStore;

use crate::error::ApiError;
use crate::session::CurrentUser;
use crate::state::AppState;

use super::cart::CartLineResponse;
use super::parse_uuid;

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub city: String,
    pub payment_method: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub items: Vec<CartLineResponse>,
    pub total_cents: i64,
    pub total: String,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub subtotal_cents: i64,
}

#[derive(Serialize)]
pub struct OrderSuccessResponse {
    pub order_id: String,
    pub total_cents: i64,
    pub total: String,
    pub payment_method: String,
    pub shipping_address: String,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

// -- Handlers --

/// GET /checkout/ — the order summary, or a redirect to the catalog
/// when the cart is empty.
#[tracing::instrument(skip(state))]
pub async fn review<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
) -> Result<Response, ApiError> {
    match state.checkout.checkout_page(user.id).await {
        Ok(page) => Ok(Json(CheckoutResponse {
            items: page.lines.into_iter().map(Into::into).collect(),
            total_cents: page.total.cents(),
            total: page.total.to_string(),
        })
        .into_response()),
        Err(DomainError::EmptyCart) => {
            tracing::warn!(user_id = %user.id, "checkout visited with an empty cart");
            Ok(Redirect::to("/products/").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /checkout/ — places the order and redirects to its confirmation.
#[tracing::instrument(skip(state, form))]
pub async fn place<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, ApiError> {
    let details = OrderDetails {
        full_name: form.full_name,
        phone: form.phone,
        address: form.address_line1,
        city: form.city,
        payment_method: form.payment_method,
    };

    match state.checkout.place_order(user.id, details).await {
        Ok(order) => Ok(Redirect::to(&format!("/order/success/{}/", order.id)).into_response()),
        Err(DomainError::EmptyCart) => {
            tracing::warn!(user_id = %user.id, "checkout submitted with an empty cart");
            Ok(Redirect::to("/products/").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /order/success/{order_id}/ — the confirmation page, scoped to
/// the order's owner.
#[tracing::instrument(skip(state))]
pub async fn success<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
    Path(order_id): Path<String>,
) -> Result<Json<OrderSuccessResponse>, ApiError> {
    let id = OrderId::from_uuid(parse_uuid(&order_id, "order id")?);
    let (order, items) = state.checkout.order_success(user.id, id).await?;
    Ok(Json(OrderSuccessResponse {
        order_id: order.id.to_string(),
        total_cents: order.total_cents,
        total: Money::from_cents(order.total_cents).to_string(),
        payment_method: order.payment_method,
        shipping_address: order.shipping_address,
        created_at: order.created_at.to_rfc3339(),
        items: items
            .into_iter()
            .map(|item| OrderItemResponse {
                product_id: item.product_id.to_string(),
                quantity: item.quantity,
                price_cents: item.price_cents,
                subtotal_cents: item.subtotal_cents(),
            })
            .collect(),
    }))
}
