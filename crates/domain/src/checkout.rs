//! Checkout: turning a cart into an order.
//!
//! Placing an order is a sequence of independent auto-committed writes:
//! order header, then per line an order item and a stock write-back, then
//! the cart wipe. There is no transaction around the sequence and no
//! concurrency control; the stock write-back subtracts from the value read
//! at the start, with no floor at zero.

use std::sync::Arc;
use std::time::Instant;

use common::{OrderId, UserId};
use shop_store::{Order, OrderItem, ShopStore};

use crate::cart::{CartLine, get_or_create_cart, load_lines};
use crate::error::DomainError;
use crate::money::Money;

/// Shipping and payment details submitted with a checkout.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub payment_method: String,
}

/// The checkout review page.
#[derive(Debug, Clone)]
pub struct CheckoutPage {
    pub lines: Vec<CartLine>,
    pub total: Money,
}

/// Service for the checkout flow and placed orders.
pub struct CheckoutService<S> {
    store: Arc<S>,
}

impl<S: ShopStore> CheckoutService<S> {
    /// Creates a new checkout service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Builds the checkout review page.
    ///
    /// Fails with [`DomainError::EmptyCart`] when there is nothing to buy.
    #[tracing::instrument(skip(self))]
    pub async fn checkout_page(&self, user_id: UserId) -> Result<CheckoutPage, DomainError> {
        let cart = get_or_create_cart(self.store.as_ref(), user_id).await?;
        let (lines, total) = load_lines(self.store.as_ref(), cart.id).await?;
        if lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        Ok(CheckoutPage { lines, total })
    }

    /// Places an order from the user's current cart.
    ///
    /// Reads the cart once, then writes: the order header, one order item
    /// per line with the price captured at read time, the stock write-back
    /// per product, and finally the cart wipe.
    #[tracing::instrument(skip(self, details))]
    pub async fn place_order(
        &self,
        user_id: UserId,
        details: OrderDetails,
    ) -> Result<Order, DomainError> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let checkout_start = Instant::now();

        let cart = get_or_create_cart(self.store.as_ref(), user_id).await?;
        let (lines, total) = load_lines(self.store.as_ref(), cart.id).await?;
        if lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let shipping_address = format!(
            "{}, {}, {}, {}",
            details.full_name, details.phone, details.address, details.city
        );
        let order = Order::new(
            user_id,
            total.cents(),
            details.payment_method,
            shipping_address,
        );

        self.store.insert_order(order.clone()).await?;
        for line in &lines {
            self.store
                .insert_order_item(OrderItem::new(
                    order.id,
                    line.product.id,
                    line.item.quantity,
                    line.product.price_cents,
                ))
                .await?;
            // Subtracts from the stock read when the lines were loaded;
            // concurrent checkouts can drive the stored value negative.
            self.store
                .update_product_stock(line.product.id, line.product.stock - line.item.quantity)
                .await?;
        }
        self.store.clear_cart(cart.id).await?;

        let duration = checkout_start.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);
        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(
            order_id = %order.id,
            total_cents = order.total_cents,
            duration,
            "order placed"
        );

        Ok(order)
    }

    /// Loads a placed order with its lines, scoped to the owning user.
    /// Other users' orders read as missing.
    #[tracing::instrument(skip(self))]
    pub async fn order_success(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<(Order, Vec<OrderItem>), DomainError> {
        let order = self
            .store
            .get_order(order_id)
            .await?
            .filter(|o| o.user_id == user_id)
            .ok_or(DomainError::OrderNotFound(order_id))?;
        let items = self.store.list_order_items(order_id).await?;
        Ok((order, items))
    }
}
