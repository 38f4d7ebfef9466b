//! Domain layer for the storefront.
//!
//! This crate provides the services behind the HTTP surface:
//! - [`CatalogService`] for browsing and initial data
//! - [`AuthService`] for accounts and sessions
//! - [`CartService`] for cart mutations and the cart page
//! - [`CheckoutService`] for placing and viewing orders
//!
//! Services are generic over the [`shop_store::ShopStore`] backend and hold
//! it behind an [`std::sync::Arc`] so one store instance serves all of them.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;

pub use auth::AuthService;
pub use cart::{AddToCartOutcome, CartAction, CartLine, CartService, CartView};
pub use catalog::{CatalogService, ProductListing};
pub use checkout::{CheckoutPage, CheckoutService, OrderDetails};
pub use error::DomainError;
pub use money::Money;
