//! Persistence layer for the storefront.
//!
//! Defines the [`ShopStore`] trait over the relational schema (categories,
//! products, users, sessions, carts, cart items, orders, order items) and two
//! implementations: [`InMemoryStore`] for development and tests, and
//! [`PostgresStore`] backed by sqlx. Every trait operation is a single
//! independent write or read; the store offers no transactional grouping,
//! matching the auto-commit behavior the services are written against.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod records;
pub mod store;

pub use common::{
    CartId, CartItemId, CategoryId, OrderId, OrderItemId, ProductId, SessionToken, UserId,
};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use query::{ProductQuery, ProductSort};
pub use records::{Cart, CartItem, Category, Order, OrderItem, Product, Session, User};
pub use store::ShopStore;
