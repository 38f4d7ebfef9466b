//! Row types for the storefront schema.
//!
//! These are plain data records shared by both store backends. Monetary
//! amounts are integer cents; quantities and stock are signed so the
//! unguarded checkout decrement can drive stock below zero, which the
//! services treat as observable state rather than an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::{CartId, CartItemId, CategoryId, OrderId, OrderItemId, ProductId, SessionToken, UserId};

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-friendly unique key, e.g. `home-living`.
    pub slug: String,
}

impl Category {
    /// Creates a category with a fresh id.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Available inventory. Mutated only by checkout and admin edits; the
    /// checkout path writes back a computed value without a floor.
    pub stock: i64,
    pub rating: f64,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with a fresh id and the current timestamp.
    pub fn new(
        name: impl Into<String>,
        price_cents: i64,
        stock: i64,
        rating: f64,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            description: None,
            price_cents,
            stock,
            rating,
            category_id,
            created_at: Utc::now(),
        }
    }

    /// Sets the description, builder-style.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2 PHC-format hash; never the plain password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user record from a username and an already-computed hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session with a fresh token for the given user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            token: SessionToken::new(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// A user's cart. One per user, created lazily on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a cart for the given user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: CartId::new(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// One (product, quantity) line in a cart. Unique per (cart, product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart line with the given quantity.
    pub fn new(cart_id: CartId, product_id: ProductId, quantity: i64) -> Self {
        Self {
            id: CartItemId::new(),
            cart_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        }
    }
}

/// A placed order. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Denormalized total in cents, computed once at cart-read time.
    pub total_cents: i64,
    pub payment_method: String,
    /// Single joined string: `"{full_name}, {phone}, {address_line1}, {city}"`.
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order with a fresh id and the current timestamp.
    pub fn new(
        user_id: UserId,
        total_cents: i64,
        payment_method: impl Into<String>,
        shipping_address: impl Into<String>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            user_id,
            total_cents,
            payment_method: payment_method.into(),
            shipping_address: shipping_address.into(),
            created_at: Utc::now(),
        }
    }
}

/// Snapshot of a cart line at checkout time. The price is the product's
/// price at that instant and is never re-read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price in cents captured at purchase time.
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Creates an order line snapshot.
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: i64, price_cents: i64) -> Self {
        Self {
            id: OrderItemId::new(),
            order_id,
            product_id,
            quantity,
            price_cents,
            created_at: Utc::now(),
        }
    }

    /// Returns `quantity × price` for this line, in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.quantity * self.price_cents
    }
}
