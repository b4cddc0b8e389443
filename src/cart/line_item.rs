//! Line items

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{PricingError, line_total_minor},
    products::{Product, ProductId},
};

/// One row in the cart: a product snapshot and how many of it.
///
/// Name, image and price are copied from the product when it is first added,
/// so later catalog changes do not reprice the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    product_id: ProductId,
    name: String,
    image: String,
    price: Money<'static, Currency>,
    quantity: NonZeroU32,
}

impl LineItem {
    pub(crate) fn from_product(product: &Product, quantity: NonZeroU32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Id of the product this line is for.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product name at the time it was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product image at the time it was added.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Unit price at the time it was added.
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Number of units, always at least one.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, PricingError> {
        let minor = line_total_minor(&self.price, self.quantity)?;

        Ok(Money::from_minor(minor, self.price.currency()))
    }
}
