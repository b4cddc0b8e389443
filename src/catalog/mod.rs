//! Catalog
//!
//! The read-only product collection the storefront browses. The cart never
//! reads from it; surfaces look products up here and hand them to the cart.

use std::{fs, io, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    pricing::PricingError,
    products::{Product, ProductId},
};

pub mod query;
pub mod records;
pub mod source;

pub use query::{CatalogQuery, CategoryFilter, QueryParseError, SortOrder};
pub use records::Category;
pub use source::{CatalogFormat, CatalogSource, CatalogState, FileCatalogSource, StaticCatalogSource};

use records::{CatalogFile, parse_currency};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A product price could not be converted to minor units
    #[error("Invalid price for product {id}: {source}")]
    InvalidPrice {
        /// Product whose price was rejected
        id: ProductId,

        /// Underlying conversion error
        source: PricingError,
    },

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// The file extension does not name a supported format
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: &'static Currency,
    categories: Vec<Category>,
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products already priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn new(
        currency: &'static Currency,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self {
            currency,
            categories,
            products,
            index,
        })
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid catalog.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_file(serde_json::from_str(json)?)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid catalog.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Self::from_file(serde_norway::from_str(yaml)?)
    }

    /// Load a catalog file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or has an unknown extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        let contents = fs::read_to_string(path)?;

        let catalog = format.parse(&contents)?;

        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            currency = catalog.currency.iso_alpha_code,
            "loaded catalog"
        );

        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let currency = parse_currency(&file.currency)?;

        let products = file
            .products
            .into_iter()
            .map(|record| record.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(currency, file.categories, products)
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Iterate over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products matching `query`, in the query's order.
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// Products flagged as featured, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_featured)
    }

    /// Products flagged as new arrivals, in catalog order.
    pub fn new_arrivals(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_new)
    }

    /// Browsable categories.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;

    use super::*;

    const CATALOG_JSON: &str = r#"{
        "currency": "INR",
        "categories": [{ "id": "electronics", "name": "Electronics", "icon": "bolt" }],
        "products": [
            { "id": 1, "name": "Headphones", "category": "electronics", "price": 2999, "isFeatured": true },
            { "id": 2, "name": "Charger", "category": "electronics", "price": 499.5, "inStock": false, "isNew": true }
        ]
    }"#;

    #[test]
    fn from_json_str_builds_products_in_order() -> TestResult {
        let catalog = Catalog::from_json_str(CATALOG_JSON)?;

        let names: Vec<&str> = catalog.iter().map(|product| product.name.as_str()).collect();

        assert_eq!(names, vec!["Headphones", "Charger"]);
        assert_eq!(catalog.currency(), INR);
        assert_eq!(catalog.categories().len(), 1);

        Ok(())
    }

    #[test]
    fn get_finds_product_by_id() -> TestResult {
        let catalog = Catalog::from_json_str(CATALOG_JSON)?;

        let charger = catalog.get(ProductId::new(2)).ok_or("missing product")?;

        assert_eq!(charger.price, Money::from_minor(49_950, INR));
        assert!(!charger.in_stock);
        assert!(catalog.get(ProductId::new(99)).is_none());

        Ok(())
    }

    #[test]
    fn featured_and_new_arrivals_follow_flags() -> TestResult {
        let catalog = Catalog::from_json_str(CATALOG_JSON)?;

        let featured: Vec<u64> = catalog.featured().map(|p| p.id.get()).collect();
        let arrivals: Vec<u64> = catalog.new_arrivals().map(|p| p.id.get()).collect();

        assert_eq!(featured, vec![1]);
        assert_eq!(arrivals, vec![2]);

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{ "products": [
            { "id": 1, "name": "A", "price": 1 },
            { "id": 1, "name": "B", "price": 2 }
        ] }"#;

        let result = Catalog::from_json_str(json);

        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == ProductId::new(1)));
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = Catalog::from_json_str(r#"{ "currency": "XYZ", "products": [] }"#);

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "XYZ"));
    }

    #[test]
    fn from_yaml_str_parses_same_shape() -> TestResult {
        let yaml = "currency: USD\nproducts:\n  - id: 3\n    name: Lamp\n    price: 19.99\n";

        let catalog = Catalog::from_yaml_str(yaml)?;
        let lamp = catalog.get(ProductId::new(3)).ok_or("missing product")?;

        assert_eq!(lamp.price.to_minor_units(), 1_999);

        Ok(())
    }
}
