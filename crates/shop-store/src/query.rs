//! Catalog listing filters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use common::CategoryId;

/// Sort orders accepted by the product listing.
///
/// The wire values (`price_asc`, `price_desc`, `rating_desc`) parse via
/// [`FromStr`]. Parsing is strict; how to treat an unknown value is left
/// to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "rating_desc" => Ok(Self::RatingDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Filter and ordering for [`ShopStore::list_products`].
///
/// With no fields set this lists the whole catalog in insertion order.
///
/// [`ShopStore::list_products`]: crate::ShopStore::list_products
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub category_id: Option<CategoryId>,
    pub sort: Option<ProductSort>,
    pub limit: Option<i64>,
}

impl ProductQuery {
    /// Query matching every product, unsorted and unbounded.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts results to one category.
    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Applies a sort order.
    pub fn sorted_by(mut self, sort: ProductSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Caps the number of rows returned.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
