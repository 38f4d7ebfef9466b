//! HTTP storefront server with observability.
//!
//! JSON endpoints for catalog browsing, session auth, per-user carts,
//! and checkout, with structured logging (tracing) and Prometheus
//! metrics. Paths keep the storefront's original trailing slashes.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use shop_store::ShopStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: ShopStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::catalog::home::<S>))
        .route("/products/", get(routes::catalog::list::<S>))
        .route("/products/{product_id}/", get(routes::catalog::detail::<S>))
        .route("/register/", post(routes::auth::register::<S>))
        .route("/login/", post(routes::auth::login::<S>))
        .route("/logout/", post(routes::auth::logout::<S>))
        .route("/cart/add/{product_id}/", post(routes::cart::add::<S>))
        .route("/cart/", get(routes::cart::view::<S>))
        .route("/cart/update/{item_id}/", post(routes::cart::update::<S>))
        .route("/cart/remove/{item_id}/", post(routes::cart::remove::<S>))
        .route("/checkout/", get(routes::checkout::review::<S>))
        .route("/checkout/", post(routes::checkout::place::<S>))
        .route(
            "/order/success/{order_id}/",
            get(routes::checkout::success::<S>),
        )
        .route("/health", get(routes::health::check))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
