use async_trait::async_trait;

use crate::{
    Cart, CartId, CartItem, CartItemId, Category, Order, OrderId, OrderItem, Product,
    ProductId, ProductQuery, Result, Session, SessionToken, User, UserId,
};

/// Core trait for storefront persistence backends.
///
/// Every method is one independent statement against the backing store.
/// There is no way to group writes: callers that perform multi-step
/// mutations (checkout in particular) do so as a sequence of auto-committed
/// operations, and a failure partway through leaves the earlier writes in
/// place. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ShopStore: Send + Sync {
    // Categories

    /// Inserts a category.
    ///
    /// Fails with [`StoreError::Duplicate`] if the slug is already taken.
    ///
    /// [`StoreError::Duplicate`]: crate::StoreError::Duplicate
    async fn insert_category(&self, category: Category) -> Result<()>;

    /// Looks up a category by its slug.
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// Lists all categories in insertion order.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    // Products

    /// Inserts a product.
    async fn insert_product(&self, product: Product) -> Result<()>;

    /// Retrieves a product by id.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Lists products matching the query.
    ///
    /// Without a sort order, products come back in insertion order.
    async fn list_products(&self, query: ProductQuery) -> Result<Vec<Product>>;

    /// Overwrites a product's stock with the given value.
    ///
    /// The value is stored as-is; negative stock is accepted. Writing to a
    /// missing product is a no-op.
    async fn update_product_stock(&self, id: ProductId, stock: i64) -> Result<()>;

    // Users

    /// Inserts a user.
    ///
    /// Fails with [`StoreError::Duplicate`] if the username is already taken.
    ///
    /// [`StoreError::Duplicate`]: crate::StoreError::Duplicate
    async fn insert_user(&self, user: User) -> Result<()>;

    /// Retrieves a user by id.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Looks up a user by username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    // Sessions

    /// Inserts a session.
    async fn insert_session(&self, session: Session) -> Result<()>;

    /// Resolves a session token.
    ///
    /// Returns None for unknown or already-deleted tokens.
    async fn get_session(&self, token: SessionToken) -> Result<Option<Session>>;

    /// Deletes a session. Deleting an unknown token is a no-op.
    async fn delete_session(&self, token: SessionToken) -> Result<()>;

    // Carts

    /// Inserts a cart.
    ///
    /// Fails with [`StoreError::Duplicate`] if the user already has one.
    ///
    /// [`StoreError::Duplicate`]: crate::StoreError::Duplicate
    async fn insert_cart(&self, cart: Cart) -> Result<()>;

    /// Retrieves the cart belonging to a user, if any.
    async fn get_cart_for_user(&self, user_id: UserId) -> Result<Option<Cart>>;

    // Cart items

    /// Inserts a cart line.
    ///
    /// Fails with [`StoreError::Duplicate`] if the cart already has a line
    /// for this product.
    ///
    /// [`StoreError::Duplicate`]: crate::StoreError::Duplicate
    async fn insert_cart_item(&self, item: CartItem) -> Result<()>;

    /// Retrieves a cart line by id.
    async fn get_cart_item(&self, id: CartItemId) -> Result<Option<CartItem>>;

    /// Finds the line for a given product within a cart.
    async fn find_cart_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>>;

    /// Lists a cart's lines in insertion order.
    async fn list_cart_items(&self, cart_id: CartId) -> Result<Vec<CartItem>>;

    /// Overwrites a cart line's quantity. Writing to a missing line is a
    /// no-op.
    async fn update_cart_item_quantity(&self, id: CartItemId, quantity: i64) -> Result<()>;

    /// Deletes a cart line. Deleting a missing line is a no-op.
    async fn delete_cart_item(&self, id: CartItemId) -> Result<()>;

    /// Deletes every line in a cart. The cart row itself survives.
    async fn clear_cart(&self, cart_id: CartId) -> Result<()>;

    // Orders

    /// Inserts an order header.
    async fn insert_order(&self, order: Order) -> Result<()>;

    /// Inserts one order line.
    async fn insert_order_item(&self, item: OrderItem) -> Result<()>;

    /// Retrieves an order by id.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Lists an order's lines in insertion order.
    async fn list_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>>;
}
