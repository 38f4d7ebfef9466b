//! Cart operations.
//!
//! A user's cart is created lazily the first time anything touches it.
//! Stock acts as a soft ceiling here: adding and increasing stop at the
//! product's current stock, but nothing re-checks later, so checkout can
//! still oversell against carts filled earlier.

use std::str::FromStr;
use std::sync::Arc;

use common::{CartId, CartItemId, ProductId, UserId};
use shop_store::{Cart, CartItem, Product, ShopStore, StoreError};

use crate::error::DomainError;
use crate::money::Money;

/// Quantity mutation requested for one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Increase,
    Decrease,
}

impl FromStr for CartAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            other => Err(format!("unknown cart action: {other}")),
        }
    }
}

/// Result of an add-to-cart request.
///
/// `success` is false only for out-of-stock products; hitting the stock
/// ceiling on an existing line still reports success with an explanatory
/// message, mirroring the storefront's original behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToCartOutcome {
    pub success: bool,
    /// Total quantity across the cart after the call. Absent when the cart
    /// was never touched.
    pub cart_count: Option<i64>,
    pub message: String,
}

/// One rendered cart line.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
    pub subtotal: Money,
}

/// The cart page: lines, grand total, and item count for the badge.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub cart_count: i64,
}

/// Loads a cart's lines with their products and returns them with the
/// grand total. Prices are whatever the products say right now.
pub(crate) async fn load_lines<S: ShopStore>(
    store: &S,
    cart_id: CartId,
) -> Result<(Vec<CartLine>, Money), DomainError> {
    let items = store.list_cart_items(cart_id).await?;

    let mut lines = Vec::with_capacity(items.len());
    let mut total = Money::zero();
    for item in items {
        let product = store
            .get_product(item.product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(item.product_id))?;
        let subtotal = Money::from_cents(product.price_cents).multiply(item.quantity);
        total += subtotal;
        lines.push(CartLine {
            item,
            product,
            subtotal,
        });
    }

    Ok((lines, total))
}

/// Fetches the user's cart, creating it on first use.
pub(crate) async fn get_or_create_cart<S: ShopStore>(
    store: &S,
    user_id: UserId,
) -> Result<Cart, DomainError> {
    if let Some(cart) = store.get_cart_for_user(user_id).await? {
        return Ok(cart);
    }

    let cart = Cart::new(user_id);
    if let Err(e) = store.insert_cart(cart.clone()).await {
        // Lost the creation race to a concurrent request
        if matches!(e, StoreError::Duplicate { .. })
            && let Some(existing) = store.get_cart_for_user(user_id).await?
        {
            return Ok(existing);
        }
        return Err(e.into());
    }
    Ok(cart)
}

/// Service for cart mutations and the cart page.
pub struct CartService<S> {
    store: Arc<S>,
}

impl<S: ShopStore> CartService<S> {
    /// Creates a new cart service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Adds one unit of a product to the user's cart.
    ///
    /// A new line starts at quantity 1; an existing line is incremented
    /// unless it already sits at the product's stock.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<AddToCartOutcome, DomainError> {
        let product = self
            .store
            .get_product(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        if product.stock <= 0 {
            return Ok(AddToCartOutcome {
                success: false,
                cart_count: None,
                message: "Product is out of stock".to_string(),
            });
        }

        let cart = get_or_create_cart(self.store.as_ref(), user_id).await?;

        let message = match self.store.find_cart_item(cart.id, product.id).await? {
            Some(item) => {
                if item.quantity < product.stock {
                    self.store
                        .update_cart_item_quantity(item.id, item.quantity + 1)
                        .await?;
                    metrics::counter!("cart_items_added_total").increment(1);
                    format!("Increased {} quantity in cart!", product.name)
                } else {
                    format!("Stock limit reached for {}", product.name)
                }
            }
            None => {
                match self
                    .store
                    .insert_cart_item(CartItem::new(cart.id, product.id, 1))
                    .await
                {
                    Ok(()) => {}
                    // Two adds raced; the line exists at quantity 1 either way
                    Err(StoreError::Duplicate { .. }) => {}
                    Err(e) => return Err(e.into()),
                }
                metrics::counter!("cart_items_added_total").increment(1);
                format!("{} added to cart!", product.name)
            }
        };

        let cart_count = self.cart_count(cart.id).await?;
        Ok(AddToCartOutcome {
            success: true,
            cart_count: Some(cart_count),
            message,
        })
    }

    /// Applies an increase/decrease action to one cart line.
    ///
    /// Increasing stops silently at the product's stock. Decreasing below
    /// one removes the line.
    #[tracing::instrument(skip(self))]
    pub async fn update_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        action: CartAction,
    ) -> Result<(), DomainError> {
        let item = self.owned_item(user_id, item_id).await?;

        match action {
            CartAction::Increase => {
                let product = self
                    .store
                    .get_product(item.product_id)
                    .await?
                    .ok_or(DomainError::ProductNotFound(item.product_id))?;
                if item.quantity < product.stock {
                    self.store
                        .update_cart_item_quantity(item.id, item.quantity + 1)
                        .await?;
                }
            }
            CartAction::Decrease => {
                if item.quantity > 1 {
                    self.store
                        .update_cart_item_quantity(item.id, item.quantity - 1)
                        .await?;
                } else {
                    self.store.delete_cart_item(item.id).await?;
                }
            }
        }

        Ok(())
    }

    /// Removes one cart line regardless of its quantity.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<(), DomainError> {
        let item = self.owned_item(user_id, item_id).await?;
        self.store.delete_cart_item(item.id).await?;
        Ok(())
    }

    /// Builds the cart page for a user.
    #[tracing::instrument(skip(self))]
    pub async fn cart_page(&self, user_id: UserId) -> Result<CartView, DomainError> {
        let cart = get_or_create_cart(self.store.as_ref(), user_id).await?;
        let (lines, total) = load_lines(self.store.as_ref(), cart.id).await?;

        let cart_count = lines.iter().map(|l| l.item.quantity).sum();
        Ok(CartView {
            lines,
            total,
            cart_count,
        })
    }

    /// Loads a cart line and checks it belongs to the user's cart. Lines
    /// of other users are indistinguishable from missing ones.
    async fn owned_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<CartItem, DomainError> {
        let item = self
            .store
            .get_cart_item(item_id)
            .await?
            .ok_or(DomainError::CartItemNotFound(item_id))?;

        match self.store.get_cart_for_user(user_id).await? {
            Some(cart) if cart.id == item.cart_id => Ok(item),
            _ => Err(DomainError::CartItemNotFound(item_id)),
        }
    }

    async fn cart_count(&self, cart_id: CartId) -> Result<i64, DomainError> {
        let items = self.store.list_cart_items(cart_id).await?;
        Ok(items.iter().map(|i| i.quantity).sum())
    }
}
