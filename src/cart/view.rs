//! Cart views

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::line_item::LineItem,
    pricing::{PricingError, line_total_minor, total_minor},
    products::ProductId,
};

/// Read-only snapshot of the cart handed to surfaces.
///
/// Totals are computed from the items on every call.
#[derive(Debug, Clone, Copy)]
pub struct CartView<'a> {
    items: &'a [LineItem],
    currency: &'static Currency,
}

impl<'a> CartView<'a> {
    pub(crate) fn new(items: &'a [LineItem], currency: &'static Currency) -> Self {
        Self { items, currency }
    }

    /// Line items in the order they were first added.
    pub fn items(&self) -> &'a [LineItem] {
        self.items
    }

    /// Iterate over the line items.
    pub fn iter(&self) -> std::slice::Iter<'a, LineItem> {
        self.items.iter()
    }

    /// The line for `product_id`, if present.
    pub fn get(&self, product_id: ProductId) -> Option<&'a LineItem> {
        self.items
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum()
    }

    /// Sum of price times quantity over all lines; zero when empty.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        let totals = self
            .items
            .iter()
            .map(|line| line_total_minor(line.price(), line.quantity()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Money::from_minor(total_minor(totals)?, self.currency))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency the cart is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
