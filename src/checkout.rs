//! Checkout
//!
//! Order totals shown on the checkout summary. Tax is a single fixed rate on
//! the subtotal; there is no jurisdiction logic.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{
    cart::CartView,
    pricing::{PricingError, percent_of_minor, total_minor},
};

/// Shipping and tax rules applied at checkout, in the cart's minor units.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPolicy {
    /// Tax charged on the subtotal
    pub tax_rate: Percentage,

    /// Flat shipping fee
    pub shipping_fee_minor: i64,

    /// Subtotal at or above which shipping is free
    pub free_shipping_threshold_minor: Option<i64>,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Percentage::from(0.18),
            shipping_fee_minor: 4_900,
            free_shipping_threshold_minor: Some(69_900),
        }
    }
}

impl CheckoutPolicy {
    fn shipping_minor(&self, subtotal_minor: i64, is_empty: bool) -> i64 {
        let free = self
            .free_shipping_threshold_minor
            .is_some_and(|threshold| subtotal_minor >= threshold);

        if is_empty || free {
            0
        } else {
            self.shipping_fee_minor
        }
    }
}

/// Totals for the current cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals {
    /// Sum of line totals
    pub subtotal: Money<'static, Currency>,

    /// Shipping charge
    pub shipping: Money<'static, Currency>,

    /// Tax on the subtotal
    pub tax: Money<'static, Currency>,

    /// Amount payable
    pub total: Money<'static, Currency>,
}

impl CheckoutTotals {
    /// Calculate totals for `cart` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any amount overflows.
    pub fn calculate(cart: &CartView<'_>, policy: &CheckoutPolicy) -> Result<Self, PricingError> {
        let currency = cart.currency();
        let subtotal = cart.subtotal()?.to_minor_units();
        let shipping = policy.shipping_minor(subtotal, cart.is_empty());
        let tax = percent_of_minor(&policy.tax_rate, subtotal)?;
        let total = total_minor([subtotal, shipping, tax])?;

        Ok(Self {
            subtotal: Money::from_minor(subtotal, currency),
            shipping: Money::from_minor(shipping, currency),
            tax: Money::from_minor(tax, currency),
            total: Money::from_minor(total, currency),
        })
    }

    /// Whether shipping was waived.
    pub fn free_shipping(&self) -> bool {
        self.shipping.to_minor_units() == 0
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::{cart::CartStore, products::Product};

    use super::*;

    fn policy() -> CheckoutPolicy {
        CheckoutPolicy {
            tax_rate: Percentage::from(0.18),
            shipping_fee_minor: 4_900,
            free_shipping_threshold_minor: Some(69_900),
        }
    }

    #[test]
    fn small_order_pays_shipping_and_tax() -> TestResult {
        let mut cart = CartStore::new(INR);
        cart.add_item(&Product::new(1, "Mug", Money::from_minor(25_000, INR)), 2);

        let totals = CheckoutTotals::calculate(&cart.view(), &policy())?;

        assert_eq!(totals.subtotal, Money::from_minor(50_000, INR));
        assert_eq!(totals.shipping, Money::from_minor(4_900, INR));
        assert_eq!(totals.tax, Money::from_minor(9_000, INR));
        assert_eq!(totals.total, Money::from_minor(63_900, INR));
        assert!(!totals.free_shipping());

        Ok(())
    }

    #[test]
    fn order_at_threshold_ships_free() -> TestResult {
        let mut cart = CartStore::new(INR);
        cart.add_one(&Product::new(1, "Lamp", Money::from_minor(69_900, INR)));

        let totals = CheckoutTotals::calculate(&cart.view(), &policy())?;

        assert!(totals.free_shipping());
        assert_eq!(totals.tax, Money::from_minor(12_582, INR));
        assert_eq!(totals.total, Money::from_minor(82_482, INR));

        Ok(())
    }

    #[test]
    fn order_just_below_threshold_pays_shipping() -> TestResult {
        let mut cart = CartStore::new(INR);
        cart.add_one(&Product::new(1, "Lamp", Money::from_minor(69_899, INR)));

        let totals = CheckoutTotals::calculate(&cart.view(), &policy())?;

        assert!(!totals.free_shipping());
        assert_eq!(totals.shipping, Money::from_minor(4_900, INR));
        assert_eq!(totals.tax, Money::from_minor(12_582, INR));
        assert_eq!(totals.total, Money::from_minor(87_381, INR));

        Ok(())
    }

    #[test]
    fn empty_cart_totals_are_zero() -> TestResult {
        let cart = CartStore::new(INR);

        let totals = CheckoutTotals::calculate(&cart.view(), &policy())?;

        assert_eq!(totals.total, Money::from_minor(0, INR));
        assert_eq!(totals.shipping, Money::from_minor(0, INR));

        Ok(())
    }

    #[test]
    fn no_threshold_always_charges_shipping() -> TestResult {
        let mut cart = CartStore::new(INR);
        cart.add_one(&Product::new(1, "Sofa", Money::from_minor(5_000_000, INR)));

        let policy = CheckoutPolicy {
            free_shipping_threshold_minor: None,
            ..policy()
        };

        let totals = CheckoutTotals::calculate(&cart.view(), &policy)?;

        assert_eq!(totals.shipping, Money::from_minor(4_900, INR));

        Ok(())
    }
}
