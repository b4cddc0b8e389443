//! Pricing

use std::num::NonZeroU32;

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while calculating cart and checkout amounts.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Minor unit arithmetic overflowed.
    #[error("amount overflowed while calculating totals")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A price was negative or could not be represented in minor units.
    #[error("invalid price amount: {0}")]
    InvalidAmount(Decimal),
}

/// Price of `quantity` units at `unit_price`, in minor units.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in an `i64`.
pub fn line_total_minor(
    unit_price: &Money<'_, Currency>,
    quantity: NonZeroU32,
) -> Result<i64, PricingError> {
    unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity.get()))
        .ok_or(PricingError::Overflow)
}

/// Sums minor unit amounts.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in an `i64`.
pub fn total_minor(amounts: impl IntoIterator<Item = i64>) -> Result<i64, PricingError> {
    amounts
        .into_iter()
        .try_fold(0_i64, |acc, amount| acc.checked_add(amount))
        .ok_or(PricingError::Overflow)
}

/// Calculates a percentage of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Converts a major unit amount (e.g. `19.99`) into minor units for `currency`.
///
/// # Errors
///
/// Returns [`PricingError::InvalidAmount`] if the amount is negative or too large.
pub fn major_to_minor(amount: Decimal, currency: &Currency) -> Result<i64, PricingError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::InvalidAmount(amount));
    }

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or(PricingError::InvalidAmount(amount))?;

    amount
        .checked_mul(Decimal::from(scale))
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or(PricingError::InvalidAmount(amount))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{INR, JPY};
    use testresult::TestResult;

    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
    }

    #[test]
    fn line_total_multiplies_unit_price() -> TestResult {
        let price = Money::from_minor(1_000, INR);

        assert_eq!(line_total_minor(&price, qty(3))?, 3_000);

        Ok(())
    }

    #[test]
    fn line_total_overflow_returns_error() {
        let price = Money::from_minor(i64::MAX, INR);

        assert_eq!(line_total_minor(&price, qty(2)), Err(PricingError::Overflow));
    }

    #[test]
    fn total_minor_of_nothing_is_zero() -> TestResult {
        assert_eq!(total_minor([])?, 0);

        Ok(())
    }

    #[test]
    fn total_minor_overflow_returns_error() {
        assert_eq!(total_minor([i64::MAX, 1]), Err(PricingError::Overflow));
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        let percent = Percentage::try_from("0.18")?;

        // 18% of 2.75 = 0.495
        assert_eq!(percent_of_minor(&percent, 275)?, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);

        assert_eq!(
            percent_of_minor(&percent, i64::MAX),
            Err(PricingError::PercentConversion)
        );
    }

    #[test]
    fn major_to_minor_uses_currency_exponent() -> TestResult {
        assert_eq!(major_to_minor(Decimal::new(1499, 0), INR)?, 149_900);
        assert_eq!(major_to_minor(Decimal::new(19_995, 3), INR)?, 2_000);
        assert_eq!(major_to_minor(Decimal::new(500, 0), JPY)?, 500);

        Ok(())
    }

    #[test]
    fn major_to_minor_rejects_negative_amounts() {
        assert_eq!(
            major_to_minor(Decimal::NEGATIVE_ONE, INR),
            Err(PricingError::InvalidAmount(Decimal::NEGATIVE_ONE))
        );
    }
}
