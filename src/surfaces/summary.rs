//! Checkout summary

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{
    cart::{CartHandle, CartView},
    checkout::{CheckoutPolicy, CheckoutTotals},
    pricing::PricingError,
    surfaces::{Attached, SurfaceError},
};

/// Price breakdown shown on the checkout page.
#[derive(Debug)]
pub struct CheckoutSummary {
    totals: Attached<Result<CheckoutTotals, PricingError>>,
}

impl CheckoutSummary {
    /// Attach a summary that prices the cart under `policy`.
    ///
    /// # Errors
    ///
    /// Returns an error if attached from inside a cart subscriber.
    pub fn attach(handle: &CartHandle, policy: CheckoutPolicy) -> Result<Self, SurfaceError> {
        let totals = Attached::new(handle, move |view: &CartView<'_>| {
            CheckoutTotals::calculate(view, &policy)
        })?;

        Ok(Self { totals })
    }

    /// Current totals.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount overflows.
    pub fn totals(&self) -> Result<CheckoutTotals, SurfaceError> {
        let totals = *self.totals.model();

        Ok(totals?)
    }

    /// Render the breakdown as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or an amount overflows.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SurfaceError> {
        let totals = self.totals()?;

        let shipping = if totals.free_shipping() {
            "Free".to_string()
        } else {
            totals.shipping.to_string()
        };

        let mut builder = Builder::default();

        builder.push_record(["Subtotal".to_string(), totals.subtotal.to_string()]);
        builder.push_record(["Shipping".to_string(), shipping]);
        builder.push_record(["Tax".to_string(), totals.tax.to_string()]);
        builder.push_record(["Grand Total".to_string(), totals.total.to_string()]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::last(), Alignment::right());

        writeln!(out, "Price Summary\n{table}")?;

        Ok(())
    }
}
