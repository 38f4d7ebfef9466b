use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Cart, CartId, CartItem, CartItemId, Category, Order, OrderId, OrderItem, Product, ProductId,
    ProductQuery, ProductSort, Result, Session, SessionToken, ShopStore, StoreError, User, UserId,
};

/// In-memory store implementation for development and testing.
///
/// Rows live in plain vectors so insertion order falls out naturally, the
/// same order the PostgreSQL implementation produces via `created_at`
/// ordering. Unique constraints are checked by scanning under the write
/// lock.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    categories: Arc<RwLock<Vec<Category>>>,
    products: Arc<RwLock<Vec<Product>>>,
    users: Arc<RwLock<Vec<User>>>,
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
    carts: Arc<RwLock<Vec<Cart>>>,
    cart_items: Arc<RwLock<Vec<CartItem>>>,
    orders: Arc<RwLock<Vec<Order>>>,
    order_items: Arc<RwLock<Vec<OrderItem>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of products stored.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl ShopStore for InMemoryStore {
    async fn insert_category(&self, category: Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.slug == category.slug) {
            return Err(StoreError::Duplicate {
                entity: "category slug",
                value: category.slug,
            });
        }
        categories.push(category);
        Ok(())
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.read().await.clone())
    }

    async fn insert_product(&self, product: Product) -> Result<()> {
        self.products.write().await.push(product);
        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self, query: ProductQuery) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut matching: Vec<_> = products
            .iter()
            .filter(|p| {
                if let Some(id) = query.category_id
                    && p.category_id != id
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        match query.sort {
            Some(ProductSort::PriceAsc) => matching.sort_by_key(|p| p.price_cents),
            Some(ProductSort::PriceDesc) => {
                matching.sort_by_key(|p| std::cmp::Reverse(p.price_cents))
            }
            Some(ProductSort::RatingDesc) => {
                matching.sort_by(|a, b| b.rating.total_cmp(&a.rating))
            }
            None => {}
        }

        if let Some(limit) = query.limit {
            matching.truncate(limit.max(0) as usize);
        }

        Ok(matching)
    }

    async fn update_product_stock(&self, id: ProductId, stock: i64) -> Result<()> {
        let mut products = self.products.write().await;
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            product.stock = stock;
        }
        Ok(())
    }

    async fn insert_user(&self, user: User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                entity: "username",
                value: user.username,
            });
        }
        users.push(user);
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_session(&self, session: Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.token) {
            return Err(StoreError::Duplicate {
                entity: "session token",
                value: session.token.to_string(),
            });
        }
        sessions.insert(session.token, session);
        Ok(())
    }

    async fn get_session(&self, token: SessionToken) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&token).cloned())
    }

    async fn delete_session(&self, token: SessionToken) -> Result<()> {
        self.sessions.write().await.remove(&token);
        Ok(())
    }

    async fn insert_cart(&self, cart: Cart) -> Result<()> {
        let mut carts = self.carts.write().await;
        if carts.iter().any(|c| c.user_id == cart.user_id) {
            return Err(StoreError::Duplicate {
                entity: "cart for user",
                value: cart.user_id.to_string(),
            });
        }
        carts.push(cart);
        Ok(())
    }

    async fn get_cart_for_user(&self, user_id: UserId) -> Result<Option<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn insert_cart_item(&self, item: CartItem) -> Result<()> {
        let mut items = self.cart_items.write().await;
        if items
            .iter()
            .any(|i| i.cart_id == item.cart_id && i.product_id == item.product_id)
        {
            return Err(StoreError::Duplicate {
                entity: "cart item",
                value: format!("{}/{}", item.cart_id, item.product_id),
            });
        }
        items.push(item);
        Ok(())
    }

    async fn get_cart_item(&self, id: CartItemId) -> Result<Option<CartItem>> {
        let items = self.cart_items.read().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_cart_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>> {
        let items = self.cart_items.read().await;
        Ok(items
            .iter()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
            .cloned())
    }

    async fn list_cart_items(&self, cart_id: CartId) -> Result<Vec<CartItem>> {
        let items = self.cart_items.read().await;
        Ok(items.iter().filter(|i| i.cart_id == cart_id).cloned().collect())
    }

    async fn update_cart_item_quantity(&self, id: CartItemId, quantity: i64) -> Result<()> {
        let mut items = self.cart_items.write().await;
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<()> {
        self.cart_items.write().await.retain(|i| i.id != id);
        Ok(())
    }

    async fn clear_cart(&self, cart_id: CartId) -> Result<()> {
        self.cart_items.write().await.retain(|i| i.cart_id != cart_id);
        Ok(())
    }

    async fn insert_order(&self, order: Order) -> Result<()> {
        self.orders.write().await.push(order);
        Ok(())
    }

    async fn insert_order_item(&self, item: OrderItem) -> Result<()> {
        self.order_items.write().await.push(item);
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        let items = self.order_items.read().await;
        Ok(items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::CategoryId;

    async fn seeded_category(store: &InMemoryStore, name: &str, slug: &str) -> Category {
        let category = Category::new(name, slug);
        store.insert_category(category.clone()).await.unwrap();
        category
    }

    #[tokio::test]
    async fn category_roundtrip() {
        let store = InMemoryStore::new();
        let category = seeded_category(&store, "Books", "books").await;

        let found = store.get_category_by_slug("books").await.unwrap();
        assert_eq!(found, Some(category));
        assert!(store.get_category_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_category_slug_rejected() {
        let store = InMemoryStore::new();
        seeded_category(&store, "Books", "books").await;

        let result = store.insert_category(Category::new("Books II", "books")).await;
        assert!(matches!(result, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn categories_listed_in_insertion_order() {
        let store = InMemoryStore::new();
        seeded_category(&store, "Electronics", "electronics").await;
        seeded_category(&store, "Books", "books").await;

        let names: Vec<_> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Electronics", "Books"]);
    }

    #[tokio::test]
    async fn products_filter_by_category() {
        let store = InMemoryStore::new();
        let books = seeded_category(&store, "Books", "books").await;
        let sports = seeded_category(&store, "Sports", "sports").await;

        store
            .insert_product(Product::new("Novel", 1200, 4, 4.0, books.id))
            .await
            .unwrap();
        store
            .insert_product(Product::new("Ball", 900, 10, 3.5, sports.id))
            .await
            .unwrap();

        let in_books = store
            .list_products(ProductQuery::all().in_category(books.id))
            .await
            .unwrap();
        assert_eq!(in_books.len(), 1);
        assert_eq!(in_books[0].name, "Novel");
    }

    #[tokio::test]
    async fn products_sort_orders() {
        let store = InMemoryStore::new();
        let category = CategoryId::new();
        for (name, price, rating) in [("A", 300, 2.0), ("B", 100, 4.5), ("C", 200, 3.0)] {
            store
                .insert_product(Product::new(name, price, 1, rating, category))
                .await
                .unwrap();
        }

        let by_price_asc: Vec<_> = store
            .list_products(ProductQuery::all().sorted_by(ProductSort::PriceAsc))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(by_price_asc, vec!["B", "C", "A"]);

        let by_price_desc: Vec<_> = store
            .list_products(ProductQuery::all().sorted_by(ProductSort::PriceDesc))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(by_price_desc, vec!["A", "C", "B"]);

        let by_rating: Vec<_> = store
            .list_products(ProductQuery::all().sorted_by(ProductSort::RatingDesc))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(by_rating, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn product_limit_takes_first_inserted() {
        let store = InMemoryStore::new();
        let category = CategoryId::new();
        for i in 0..10 {
            store
                .insert_product(Product::new(format!("P{i}"), 100, 1, 3.0, category))
                .await
                .unwrap();
        }

        let first = store
            .list_products(ProductQuery::all().limit(8))
            .await
            .unwrap();
        assert_eq!(first.len(), 8);
        assert_eq!(first[0].name, "P0");
        assert_eq!(first[7].name, "P7");
    }

    #[tokio::test]
    async fn stock_update_accepts_negative_values() {
        let store = InMemoryStore::new();
        let product = Product::new("Widget", 100, 1, 3.0, CategoryId::new());
        let id = product.id;
        store.insert_product(product).await.unwrap();

        store.update_product_stock(id, -2).await.unwrap();
        let stored = store.get_product(id).await.unwrap().unwrap();
        assert_eq!(stored.stock, -2);
    }

    #[tokio::test]
    async fn stock_update_for_missing_product_is_noop() {
        let store = InMemoryStore::new();
        store.update_product_stock(ProductId::new(), 7).await.unwrap();
        assert_eq!(store.product_count().await, 0);
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let store = InMemoryStore::new();
        store
            .insert_user(User::new("alice", "hash-a"))
            .await
            .unwrap();

        let result = store.insert_user(User::new("alice", "hash-b")).await;
        assert!(matches!(result, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn user_lookup_by_username() {
        let store = InMemoryStore::new();
        let user = User::new("alice", "hash");
        store.insert_user(user.clone()).await.unwrap();

        let by_name = store.get_user_by_username("alice").await.unwrap();
        assert_eq!(by_name, Some(user.clone()));
        let by_id = store.get_user(user.id).await.unwrap();
        assert_eq!(by_id, Some(user));
    }

    #[tokio::test]
    async fn session_roundtrip_and_delete() {
        let store = InMemoryStore::new();
        let session = Session::new(UserId::new());
        let token = session.token;
        store.insert_session(session.clone()).await.unwrap();

        assert_eq!(store.get_session(token).await.unwrap(), Some(session));

        store.delete_session(token).await.unwrap();
        assert!(store.get_session(token).await.unwrap().is_none());

        // Deleting again is a no-op
        store.delete_session(token).await.unwrap();
    }

    #[tokio::test]
    async fn one_cart_per_user() {
        let store = InMemoryStore::new();
        let user_id = UserId::new();
        let cart = Cart::new(user_id);
        store.insert_cart(cart.clone()).await.unwrap();

        assert_eq!(store.get_cart_for_user(user_id).await.unwrap(), Some(cart));

        let result = store.insert_cart(Cart::new(user_id)).await;
        assert!(matches!(result, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn one_line_per_cart_and_product() {
        let store = InMemoryStore::new();
        let cart_id = CartId::new();
        let product_id = ProductId::new();

        let item = CartItem::new(cart_id, product_id, 1);
        store.insert_cart_item(item.clone()).await.unwrap();

        let found = store.find_cart_item(cart_id, product_id).await.unwrap();
        assert_eq!(found, Some(item));

        let result = store
            .insert_cart_item(CartItem::new(cart_id, product_id, 1))
            .await;
        assert!(matches!(result, Err(StoreError::Duplicate { .. })));

        // Same product in another cart is fine
        store
            .insert_cart_item(CartItem::new(CartId::new(), product_id, 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cart_line_quantity_update_and_delete() {
        let store = InMemoryStore::new();
        let item = CartItem::new(CartId::new(), ProductId::new(), 1);
        let id = item.id;
        store.insert_cart_item(item).await.unwrap();

        store.update_cart_item_quantity(id, 4).await.unwrap();
        assert_eq!(store.get_cart_item(id).await.unwrap().unwrap().quantity, 4);

        store.delete_cart_item(id).await.unwrap();
        assert!(store.get_cart_item(id).await.unwrap().is_none());

        // Deleting again is a no-op
        store.delete_cart_item(id).await.unwrap();
    }

    #[tokio::test]
    async fn clear_cart_leaves_other_carts_alone() {
        let store = InMemoryStore::new();
        let mine = CartId::new();
        let theirs = CartId::new();
        store
            .insert_cart_item(CartItem::new(mine, ProductId::new(), 1))
            .await
            .unwrap();
        store
            .insert_cart_item(CartItem::new(mine, ProductId::new(), 2))
            .await
            .unwrap();
        store
            .insert_cart_item(CartItem::new(theirs, ProductId::new(), 3))
            .await
            .unwrap();

        store.clear_cart(mine).await.unwrap();

        assert!(store.list_cart_items(mine).await.unwrap().is_empty());
        assert_eq!(store.list_cart_items(theirs).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn order_with_items_roundtrip() {
        let store = InMemoryStore::new();
        let order = Order::new(UserId::new(), 4000, "cod", "A, 1, B, C");
        let order_id = order.id;
        store.insert_order(order.clone()).await.unwrap();
        store
            .insert_order_item(OrderItem::new(order_id, ProductId::new(), 2, 1000))
            .await
            .unwrap();
        store
            .insert_order_item(OrderItem::new(order_id, ProductId::new(), 1, 2000))
            .await
            .unwrap();

        assert_eq!(store.get_order(order_id).await.unwrap(), Some(order));
        let items = store.list_order_items(order_id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().map(OrderItem::subtotal_cents).sum::<i64>(), 4000);
    }
}
