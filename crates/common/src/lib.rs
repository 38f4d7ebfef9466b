//! Shared identifier types used across the storefront crates.

pub mod ids;

pub use ids::{
    CartId, CartItemId, CategoryId, OrderId, OrderItemId, ProductId, SessionToken, UserId,
};
