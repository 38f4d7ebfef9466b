//! Catalog browsing and initial data.

use std::sync::Arc;

use common::ProductId;
use shop_store::{Category, Product, ProductQuery, ProductSort, ShopStore, StoreError};

use crate::error::DomainError;

/// Number of products shown on the home page.
const HOME_PAGE_PRODUCTS: i64 = 8;

/// The five fixed categories created at startup.
const INITIAL_CATEGORIES: [(&str, &str); 5] = [
    ("Electronics", "electronics"),
    ("Fashion", "fashion"),
    ("Home & Living", "home-living"),
    ("Books", "books"),
    ("Sports", "sports"),
];

/// A product listing page: the matching products plus every category for
/// the filter sidebar.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Service for browsing the catalog.
pub struct CatalogService<S> {
    store: Arc<S>,
}

impl<S: ShopStore> CatalogService<S> {
    /// Creates a new catalog service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the products featured on the home page: the first eight in
    /// insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn home_page(&self) -> Result<Vec<Product>, DomainError> {
        let products = self
            .store
            .list_products(ProductQuery::all().limit(HOME_PAGE_PRODUCTS))
            .await?;
        Ok(products)
    }

    /// Returns the product listing, optionally filtered to one category and
    /// sorted.
    ///
    /// An unknown category slug yields an empty product list rather than an
    /// error; the category set always comes back in full.
    #[tracing::instrument(skip(self))]
    pub async fn product_list(
        &self,
        category_slug: Option<&str>,
        sort: Option<ProductSort>,
    ) -> Result<ProductListing, DomainError> {
        let mut query = ProductQuery::all();

        let mut unknown_category = false;
        if let Some(slug) = category_slug {
            match self.store.get_category_by_slug(slug).await? {
                Some(category) => query = query.in_category(category.id),
                None => unknown_category = true,
            }
        }
        if let Some(sort) = sort {
            query = query.sorted_by(sort);
        }

        let products = if unknown_category {
            Vec::new()
        } else {
            self.store.list_products(query).await?
        };
        let categories = self.store.list_categories().await?;

        Ok(ProductListing {
            products,
            categories,
        })
    }

    /// Retrieves one product for its detail page.
    #[tracing::instrument(skip(self))]
    pub async fn product_detail(&self, id: ProductId) -> Result<Product, DomainError> {
        self.store
            .get_product(id)
            .await?
            .ok_or(DomainError::ProductNotFound(id))
    }

    /// Lists every category.
    pub async fn categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.store.list_categories().await?)
    }

    /// Creates the five fixed categories, skipping any that already exist.
    #[tracing::instrument(skip(self))]
    pub async fn seed_categories(&self) -> Result<(), DomainError> {
        for (name, slug) in INITIAL_CATEGORIES {
            if self.store.get_category_by_slug(slug).await?.is_some() {
                tracing::debug!(slug, "category already exists, skipping");
                continue;
            }
            match self.store.insert_category(Category::new(name, slug)).await {
                Ok(()) => tracing::info!(name, "created category"),
                // Lost a seeding race, the row is there either way
                Err(StoreError::Duplicate { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Populates an empty catalog with a small demo product set. Does
    /// nothing when any product already exists.
    #[tracing::instrument(skip(self))]
    pub async fn seed_demo_products(&self) -> Result<(), DomainError> {
        let existing = self.store.list_products(ProductQuery::all().limit(1)).await?;
        if !existing.is_empty() {
            tracing::debug!("catalog already has products, skipping demo seed");
            return Ok(());
        }

        let demo: [(&str, &str, i64, i64, f64); 10] = [
            ("Wireless Headphones", "electronics", 7999, 25, 4.6),
            ("USB-C Charging Hub", "electronics", 3499, 40, 4.2),
            ("Canvas Sneakers", "fashion", 4599, 30, 4.1),
            ("Wool Scarf", "fashion", 2499, 18, 4.4),
            ("Ceramic Table Lamp", "home-living", 5299, 12, 4.3),
            ("Linen Cushion Set", "home-living", 3199, 22, 4.0),
            ("The Silent Atlas", "books", 1899, 50, 4.8),
            ("Cooking for One", "books", 1499, 35, 4.5),
            ("Yoga Mat", "sports", 2899, 28, 4.7),
            ("Trail Water Bottle", "sports", 1599, 45, 4.3),
        ];

        for (name, slug, price_cents, stock, rating) in demo {
            let Some(category) = self.store.get_category_by_slug(slug).await? else {
                tracing::warn!(slug, "demo category missing, skipping product");
                continue;
            };
            self.store
                .insert_product(Product::new(name, price_cents, stock, rating, category.id))
                .await?;
        }
        tracing::info!("seeded demo products");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_store::InMemoryStore;

    async fn service_with_categories() -> CatalogService<InMemoryStore> {
        let service = CatalogService::new(Arc::new(InMemoryStore::new()));
        service.seed_categories().await.unwrap();
        service
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let service = service_with_categories().await;
        service.seed_categories().await.unwrap();

        let categories = service.categories().await.unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].slug, "electronics");
        assert_eq!(categories[4].slug, "sports");
    }

    #[tokio::test]
    async fn home_page_caps_at_eight() {
        let service = service_with_categories().await;
        service.seed_demo_products().await.unwrap();

        let featured = service.home_page().await.unwrap();
        assert_eq!(featured.len(), 8);
        assert_eq!(featured[0].name, "Wireless Headphones");
    }

    #[tokio::test]
    async fn demo_seed_skips_populated_catalog() {
        let service = service_with_categories().await;
        service.seed_demo_products().await.unwrap();
        service.seed_demo_products().await.unwrap();

        let listing = service.product_list(None, None).await.unwrap();
        assert_eq!(listing.products.len(), 10);
    }

    #[tokio::test]
    async fn listing_filters_by_category_slug() {
        let service = service_with_categories().await;
        service.seed_demo_products().await.unwrap();

        let books = service.product_list(Some("books"), None).await.unwrap();
        assert_eq!(books.products.len(), 2);
        assert!(books.products.iter().all(|p| p.name.contains("Atlas") || p.name.contains("Cooking")));
        assert_eq!(books.categories.len(), 5);
    }

    #[tokio::test]
    async fn unknown_category_slug_yields_empty_listing() {
        let service = service_with_categories().await;
        service.seed_demo_products().await.unwrap();

        let listing = service.product_list(Some("garden"), None).await.unwrap();
        assert!(listing.products.is_empty());
        assert_eq!(listing.categories.len(), 5);
    }

    #[tokio::test]
    async fn listing_sorts_by_price() {
        let service = service_with_categories().await;
        service.seed_demo_products().await.unwrap();

        let listing = service
            .product_list(None, Some(ProductSort::PriceAsc))
            .await
            .unwrap();
        let prices: Vec<_> = listing.products.iter().map(|p| p.price_cents).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }

    #[tokio::test]
    async fn missing_product_detail_is_an_error() {
        let service = service_with_categories().await;
        let result = service.product_detail(ProductId::new()).await;
        assert!(matches!(result, Err(DomainError::ProductNotFound(_))));
    }
}
