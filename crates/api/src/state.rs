//! Shared application state.

use std::sync::Arc;

use domain::{AuthService, CartService, CatalogService, CheckoutService};
use shop_store::ShopStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S: ShopStore> {
    pub catalog: CatalogService<S>,
    pub auth: AuthService<S>,
    pub cart: CartService<S>,
    pub checkout: CheckoutService<S>,
}

impl<S: ShopStore> AppState<S> {
    /// Wires every service to one shared store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            auth: AuthService::new(store.clone()),
            cart: CartService::new(store.clone()),
            checkout: CheckoutService::new(store),
        }
    }
}
