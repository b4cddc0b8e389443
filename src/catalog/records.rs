//! Catalog file records

use rust_decimal::Decimal;
use rusty_money::{Findable, Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::CatalogError,
    pricing::major_to_minor,
    products::{Product, ProductId},
};

fn default_currency() -> String {
    "INR".to_string()
}

fn default_in_stock() -> bool {
    true
}

/// Top-level shape of a catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// ISO currency code every product is priced in
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Browsable categories
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Product records, in display order
    pub products: Vec<ProductRecord>,
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id, matched against [`Product::category`]
    pub id: String,

    /// Display name
    pub name: String,

    /// Optional icon name
    #[serde(default)]
    pub icon: Option<String>,
}

/// A product as written in a catalog file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Category id
    #[serde(default)]
    pub category: String,

    /// Price in major units (e.g. `1499` or `19.99`)
    pub price: Decimal,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Stock flag, defaults to in stock
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Average rating
    #[serde(default)]
    pub rating: Decimal,

    /// New arrival marker
    #[serde(default)]
    pub is_new: bool,

    /// Featured marker
    #[serde(default)]
    pub is_featured: bool,
}

impl ProductRecord {
    /// Converts the record into a [`Product`] priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPrice`] if the price is negative or unrepresentable.
    pub fn into_product(self, currency: &'static Currency) -> Result<Product, CatalogError> {
        let minor = major_to_minor(self.price, currency).map_err(|source| {
            CatalogError::InvalidPrice {
                id: self.id,
                source,
            }
        })?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: Money::from_minor(minor, currency),
            image: self.image,
            in_stock: self.in_stock,
            rating: self.rating,
            is_new: self.is_new,
            is_featured: self.is_featured,
        })
    }
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] if the code is not an ISO currency.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    Currency::find(code.trim()).ok_or_else(|| CatalogError::UnknownCurrency(code.to_string()))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_currency_accepts_iso_codes() -> TestResult {
        assert_eq!(parse_currency("INR")?, INR);
        assert_eq!(parse_currency(" USD ")?, USD);

        Ok(())
    }

    #[test]
    fn parse_currency_rejects_unknown_code() {
        let result = parse_currency("ABC");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn record_defaults_fill_missing_fields() -> TestResult {
        let record: ProductRecord = serde_json::from_str(r#"{"id": 7, "name": "Mug", "price": 249}"#)?;
        let product = record.into_product(INR)?;

        assert!(product.in_stock);
        assert!(!product.is_featured);
        assert_eq!(product.price, Money::from_minor(24_900, INR));

        Ok(())
    }

    #[test]
    fn record_with_negative_price_is_rejected() -> TestResult {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 7, "name": "Mug", "price": -1}"#)?;

        let result = record.into_product(INR);

        assert!(matches!(
            result,
            Err(CatalogError::InvalidPrice { id, .. }) if id == ProductId::new(7)
        ));

        Ok(())
    }
}
