use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{
    Cart, CartId, CartItem, CartItemId, Category, CategoryId, Order, OrderId, OrderItem,
    OrderItemId, Product, ProductId, ProductQuery, ProductSort, Result, Session, SessionToken,
    ShopStore, StoreError, User, UserId,
};

/// PostgreSQL-backed store implementation.
///
/// Each trait method runs exactly one auto-committed statement; the
/// multi-statement flows above this layer get no transaction from it.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a fresh pool to `database_url` and wraps it in a store.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        tracing::debug!(max_connections = 5, "postgres pool established");
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    fn map_duplicate(
        err: sqlx::Error,
        constraint: &str,
        entity: &'static str,
        value: String,
    ) -> StoreError {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.constraint() == Some(constraint)
        {
            tracing::debug!(entity, %value, "unique constraint hit");
            return StoreError::Duplicate { entity, value };
        }
        StoreError::Database(err)
    }

    fn row_to_category(row: PgRow) -> Result<Category> {
        Ok(Category {
            id: CategoryId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
        })
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price_cents: row.try_get("price_cents")?,
            stock: row.try_get("stock")?,
            rating: row.try_get("rating")?,
            category_id: CategoryId::from_uuid(row.try_get::<Uuid, _>("category_id")?),
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_user(row: PgRow) -> Result<User> {
        Ok(User {
            id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_session(row: PgRow) -> Result<Session> {
        Ok(Session {
            token: SessionToken::from_uuid(row.try_get::<Uuid, _>("token")?),
            user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_cart(row: PgRow) -> Result<Cart> {
        Ok(Cart {
            id: CartId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_cart_item(row: PgRow) -> Result<CartItem> {
        Ok(CartItem {
            id: CartItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            cart_id: CartId::from_uuid(row.try_get::<Uuid, _>("cart_id")?),
            product_id: ProductId::from_uuid(row.try_get::<Uuid, _>("product_id")?),
            quantity: row.try_get("quantity")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
            total_cents: row.try_get("total_cents")?,
            payment_method: row.try_get("payment_method")?,
            shipping_address: row.try_get("shipping_address")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_order_item(row: PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            id: OrderItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            order_id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
            product_id: ProductId::from_uuid(row.try_get::<Uuid, _>("product_id")?),
            quantity: row.try_get("quantity")?,
            price_cents: row.try_get("price_cents")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl ShopStore for PostgresStore {
    async fn insert_category(&self, category: Category) -> Result<()> {
        let slug = category.slug.clone();
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(&category.slug)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "unique_category_slug", "category slug", slug))?;

        Ok(())
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, slug
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_category).transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, slug
            FROM categories
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_category).collect()
    }

    async fn insert_product(&self, product: Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, stock, rating, category_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.rating)
        .bind(product.category_id.as_uuid())
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, stock, rating, category_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn list_products(&self, query: ProductQuery) -> Result<Vec<Product>> {
        let mut sql = String::from(
            "SELECT id, name, description, price_cents, stock, rating, category_id, created_at FROM products WHERE 1=1",
        );
        let mut param_count = 0;

        // Build dynamic query
        if query.category_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND category_id = ${param_count}"));
        }

        // Ties fall back to insertion order so listings are stable
        sql.push_str(match query.sort {
            Some(ProductSort::PriceAsc) => " ORDER BY price_cents ASC, created_at ASC",
            Some(ProductSort::PriceDesc) => " ORDER BY price_cents DESC, created_at ASC",
            Some(ProductSort::RatingDesc) => " ORDER BY rating DESC, created_at ASC",
            None => " ORDER BY created_at ASC",
        });

        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }

        let mut sqlx_query = sqlx::query(&sql);

        if let Some(id) = query.category_id {
            sqlx_query = sqlx_query.bind(id.as_uuid());
        }
        if let Some(limit) = query.limit {
            sqlx_query = sqlx_query.bind(limit);
        }

        let mut rows = sqlx_query.fetch(&self.pool);
        let mut products = Vec::new();
        while let Some(row) = rows.try_next().await? {
            products.push(Self::row_to_product(row)?);
        }

        Ok(products)
    }

    async fn update_product_stock(&self, id: ProductId, stock: i64) -> Result<()> {
        sqlx::query("UPDATE products SET stock = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(stock)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_user(&self, user: User) -> Result<()> {
        let username = user.username.clone();
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "unique_username", "username", username))?;

        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn insert_session(&self, session: Session) -> Result<()> {
        let token = session.token.to_string();
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.token.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "sessions_pkey", "session token", token))?;

        Ok(())
    }

    async fn get_session(&self, token: SessionToken) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, created_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_session).transpose()
    }

    async fn delete_session(&self, token: SessionToken) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_cart(&self, cart: Cart) -> Result<()> {
        let user = cart.user_id.to_string();
        sqlx::query(
            r#"
            INSERT INTO carts (id, user_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(cart.id.as_uuid())
        .bind(cart.user_id.as_uuid())
        .bind(cart.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "unique_cart_user", "cart for user", user))?;

        Ok(())
    }

    async fn get_cart_for_user(&self, user_id: UserId) -> Result<Option<Cart>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, created_at
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_cart).transpose()
    }

    async fn insert_cart_item(&self, item: CartItem) -> Result<()> {
        let key = format!("{}/{}", item.cart_id, item.product_id);
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, cart_id, product_id, quantity, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.cart_id.as_uuid())
        .bind(item.product_id.as_uuid())
        .bind(item.quantity)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_duplicate(e, "unique_cart_product", "cart item", key))?;

        Ok(())
    }

    async fn get_cart_item(&self, id: CartItemId) -> Result<Option<CartItem>> {
        let row = sqlx::query(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at
            FROM cart_items
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_cart_item).transpose()
    }

    async fn find_cart_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>> {
        let row = sqlx::query(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at
            FROM cart_items
            WHERE cart_id = $1 AND product_id = $2
            "#,
        )
        .bind(cart_id.as_uuid())
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_cart_item).transpose()
    }

    async fn list_cart_items(&self, cart_id: CartId) -> Result<Vec<CartItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(cart_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_cart_item).collect()
    }

    async fn update_cart_item_quantity(&self, id: CartItemId, quantity: i64) -> Result<()> {
        sqlx::query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<()> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn clear_cart(&self, cart_id: CartId) -> Result<()> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_order(&self, order: Order) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, total_cents, payment_method, shipping_address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.total_cents)
        .bind(&order.payment_method)
        .bind(&order.shipping_address)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_order_item(&self, item: OrderItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, price_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.order_id.as_uuid())
        .bind(item.product_id.as_uuid())
        .bind(item.quantity)
        .bind(item.price_cents)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, total_cents, payment_method, shipping_address, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }

    async fn list_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, quantity, price_cents, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order_item).collect()
    }
}
