//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Stable catalog identifier for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product id from its raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Category id the product is listed under
    pub category: String,

    /// Catalog price
    pub price: Money<'static, Currency>,

    /// Display image reference
    pub image: String,

    /// Whether the product can currently be bought
    pub in_stock: bool,

    /// Average rating (display only)
    pub rating: Decimal,

    /// Shown with a "new" marker
    pub is_new: bool,

    /// Shown on the featured shelf
    pub is_featured: bool,
}

impl Product {
    /// Creates an in-stock product with empty display metadata.
    pub fn new(id: u64, name: impl Into<String>, price: Money<'static, Currency>) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price,
            image: String::new(),
            in_stock: true,
            rating: Decimal::ZERO,
            is_new: false,
            is_featured: false,
        }
    }

    /// Marks the product as in or out of stock.
    #[must_use]
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Sets the product category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Whether the product may be added to a cart.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.in_stock
    }
}
