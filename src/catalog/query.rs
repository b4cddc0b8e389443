//! Catalog queries

use std::{cmp::Ordering, str::FromStr};

use thiserror::Error;

use crate::products::Product;

/// Errors parsing query parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryParseError {
    /// The sort option is not recognised.
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
}

/// Product listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order
    #[default]
    Featured,

    /// Cheapest first
    PriceLowToHigh,

    /// Most expensive first
    PriceHighToLow,

    /// Highest rated first
    Rating,

    /// Name, A to Z
    NameAscending,

    /// Name, Z to A
    NameDescending,
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Featured => Ordering::Equal,
            SortOrder::PriceLowToHigh => a.price.to_minor_units().cmp(&b.price.to_minor_units()),
            SortOrder::PriceHighToLow => b.price.to_minor_units().cmp(&a.price.to_minor_units()),
            SortOrder::Rating => b.rating.cmp(&a.rating),
            SortOrder::NameAscending => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOrder::NameDescending => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "featured" => Ok(SortOrder::Featured),
            "price-low" | "price-low-high" => Ok(SortOrder::PriceLowToHigh),
            "price-high" | "price-high-low" => Ok(SortOrder::PriceHighToLow),
            "rating" => Ok(SortOrder::Rating),
            "name-a-z" | "name-asc" => Ok(SortOrder::NameAscending),
            "name-z-a" | "name-desc" => Ok(SortOrder::NameDescending),
            other => Err(QueryParseError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Category restriction for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// Only products whose category matches, ignoring case
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category.eq_ignore_ascii_case(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

/// Search, filter and sort options for listing products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    search: Option<String>,
    category: CategoryFilter,
    sort: SortOrder,
}

impl CatalogQuery {
    /// A query matching every product in catalog order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to products whose name, description or category contains `term`.
    ///
    /// Blank terms are ignored.
    #[must_use]
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    /// Restrict to a category.
    #[must_use]
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the listing order.
    #[must_use]
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `product` passes the search and category filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product) && self.matches_search(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };

        [&product.name, &product.description, &product.category]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }

    /// Filters and sorts `products`, keeping catalog order between equal keys.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products
            .into_iter()
            .filter(|product| self.matches(product))
            .collect();

        matched.sort_by(|a, b| self.sort.compare(a, b));

        matched
    }
}
