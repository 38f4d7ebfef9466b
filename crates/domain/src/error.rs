//! Domain error types.

use common::{CartItemId, OrderId, ProductId};
use shop_store::StoreError;
use thiserror::Error;

/// Errors that can occur during storefront operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the persistence layer.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Referenced cart line does not exist or belongs to another user.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(CartItemId),

    /// Referenced order does not exist or belongs to another user.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Registration attempted with a username that is already in use.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Login failed. Deliberately does not say whether the username or the
    /// password was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password hashing or verification failed for a reason other than a
    /// mismatch.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Checkout attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,
}
