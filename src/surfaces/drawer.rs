//! Cart drawer

use std::{io, num::NonZeroU32};

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{
    cart::{CartHandle, CartView, QuantityOutcome},
    pricing::PricingError,
    products::ProductId,
    surfaces::{Attached, SurfaceError},
};

/// One rendered row of the drawer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerLine {
    /// Product the row is for
    pub product_id: ProductId,

    /// Product name
    pub name: String,

    /// Product image
    pub image: String,

    /// Unit price
    pub unit_price: Money<'static, Currency>,

    /// Units in the cart
    pub quantity: NonZeroU32,

    /// Unit price times quantity
    pub line_total: Result<Money<'static, Currency>, PricingError>,
}

#[derive(Debug)]
struct DrawerModel {
    lines: Vec<DrawerLine>,
    item_count: u64,
    subtotal: Result<Money<'static, Currency>, PricingError>,
}

impl DrawerModel {
    fn from_view(view: &CartView<'_>) -> Self {
        let lines = view
            .iter()
            .map(|line| DrawerLine {
                product_id: line.product_id(),
                name: line.name().to_string(),
                image: line.image().to_string(),
                unit_price: *line.price(),
                quantity: line.quantity(),
                line_total: line.line_total(),
            })
            .collect();

        Self {
            lines,
            item_count: view.item_count(),
            subtotal: view.subtotal(),
        }
    }
}

/// Slide-out cart panel listing every line with quantity controls.
#[derive(Debug)]
pub struct CartDrawer {
    model: Attached<DrawerModel>,
}

impl CartDrawer {
    /// Attach a drawer to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if attached from inside a cart subscriber.
    pub fn attach(handle: &CartHandle) -> Result<Self, SurfaceError> {
        let model = Attached::new(handle, DrawerModel::from_view)?;

        Ok(Self { model })
    }

    /// Rendered rows in cart order.
    pub fn lines(&self) -> Vec<DrawerLine> {
        self.model.model().lines.clone()
    }

    /// Heading shown at the top of the drawer.
    pub fn title(&self) -> String {
        format!("Your Cart ({})", self.model.model().item_count)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.model.model().lines.is_empty()
    }

    /// Subtotal shown at the bottom of the drawer.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtotal overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, SurfaceError> {
        let subtotal = self.model.model().subtotal;

        Ok(subtotal?)
    }

    /// The minus button is disabled at a quantity of one.
    pub fn can_decrement(&self, product_id: ProductId) -> bool {
        self.quantity(product_id)
            .is_some_and(|quantity| quantity.get() > 1)
    }

    fn quantity(&self, product_id: ProductId) -> Option<NonZeroU32> {
        self.model
            .model()
            .lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
    }

    /// Plus button.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is busy.
    pub fn increment(&self, product_id: ProductId) -> Result<QuantityOutcome, SurfaceError> {
        Ok(self.model.handle().increment(product_id)?)
    }

    /// Minus button; does nothing while it is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is busy.
    pub fn decrement(&self, product_id: ProductId) -> Result<QuantityOutcome, SurfaceError> {
        match self.quantity(product_id) {
            None => return Ok(QuantityOutcome::NotInCart),
            Some(quantity) if quantity.get() <= 1 => return Ok(QuantityOutcome::Unchanged),
            Some(_) => {}
        }

        Ok(self.model.handle().decrement(product_id)?)
    }

    /// Trash button.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is busy.
    pub fn remove(&self, product_id: ProductId) -> Result<bool, SurfaceError> {
        Ok(self.model.handle().remove_item(product_id)?)
    }

    /// "Clear Cart" button.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is busy.
    pub fn clear(&self) -> Result<usize, SurfaceError> {
        Ok(self.model.handle().clear()?)
    }

    /// Render the drawer as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or a total overflows.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SurfaceError> {
        writeln!(out, "{}", self.title())?;

        if self.is_empty() {
            writeln!(out, "Your cart is empty")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Price", "Qty", "Total"]);

        for line in self.lines() {
            builder.push_record([
                line.name,
                line.unit_price.to_string(),
                line.quantity.to_string(),
                line.line_total?.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, "Subtotal: {}", self.subtotal()?)?;

        Ok(())
    }
}
