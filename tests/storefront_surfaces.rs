//! Badge, drawer and checkout summary sharing one cart.

use std::num::NonZeroU32;

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use storefront::prelude::*;

fn policy() -> CheckoutPolicy {
    CheckoutPolicy {
        tax_rate: Percentage::from(0.1),
        shipping_fee_minor: 4_900,
        free_shipping_threshold_minor: Some(69_900),
    }
}

#[test]
fn every_surface_sees_the_same_cart() -> TestResult {
    let handle = CartHandle::new(CartStore::new(INR));

    let badge = HeaderBadge::attach(&handle)?;
    let drawer = CartDrawer::attach(&handle)?;
    let summary = CheckoutSummary::attach(&handle, policy())?;

    let mug = Product::new(1, "Mug", Money::from_minor(20_000, INR));
    let lamp = Product::new(2, "Lamp", Money::from_minor(30_000, INR));

    handle.add_item(&mug, 1)?;
    handle.add_item(&lamp, 1)?;

    assert_eq!(badge.count(), 2);
    assert_eq!(drawer.title(), "Your Cart (2)");
    assert_eq!(drawer.subtotal()?, Money::from_minor(50_000, INR));

    let totals = summary.totals()?;

    assert_eq!(totals.shipping, Money::from_minor(4_900, INR));
    assert_eq!(totals.tax, Money::from_minor(5_000, INR));
    assert_eq!(totals.total, Money::from_minor(59_900, INR));

    drawer.increment(mug.id)?;

    assert_eq!(badge.count(), 3);
    assert!(summary.totals()?.free_shipping());
    assert_eq!(summary.totals()?.total, Money::from_minor(77_000, INR));

    Ok(())
}

#[test]
fn drawer_actions_reach_the_badge() -> TestResult {
    let handle = CartHandle::new(CartStore::new(INR));

    let badge = HeaderBadge::attach(&handle)?;
    let drawer = CartDrawer::attach(&handle)?;

    let mug = Product::new(1, "Mug", Money::from_minor(20_000, INR));

    handle.add_item(&mug, 2)?;

    assert_eq!(drawer.decrement(mug.id)?, QuantityOutcome::Updated(NonZeroU32::MIN));
    assert_eq!(drawer.decrement(mug.id)?, QuantityOutcome::Unchanged);
    assert_eq!(badge.label().as_deref(), Some("1"));

    assert!(drawer.remove(mug.id)?);
    assert_eq!(badge.label(), None);
    assert!(drawer.is_empty());

    Ok(())
}

#[test]
fn clearing_resets_every_surface() -> TestResult {
    let handle = CartHandle::new(CartStore::new(INR));

    let badge = HeaderBadge::attach(&handle)?;
    let drawer = CartDrawer::attach(&handle)?;
    let summary = CheckoutSummary::attach(&handle, policy())?;

    handle.add_item(&Product::new(1, "Mug", Money::from_minor(20_000, INR)), 3)?;
    handle.add_item(&Product::new(2, "Lamp", Money::from_minor(30_000, INR)), 1)?;

    assert_eq!(drawer.clear()?, 2);

    assert_eq!(badge.count(), 0);
    assert_eq!(drawer.title(), "Your Cart (0)");
    assert_eq!(summary.totals()?.total, Money::from_minor(0, INR));

    let mut out = Vec::new();
    drawer.write_to(&mut out)?;

    assert!(String::from_utf8(out)?.contains("Your cart is empty"));

    Ok(())
}

#[test]
fn detached_surfaces_stop_listening() -> TestResult {
    let handle = CartHandle::new(CartStore::new(INR));

    {
        let _badge = HeaderBadge::attach(&handle)?;
        let _drawer = CartDrawer::attach(&handle)?;

        assert_eq!(handle.subscriber_count()?, 2);
    }

    assert_eq!(handle.subscriber_count()?, 0);

    handle.add_item(&Product::new(1, "Mug", Money::from_minor(20_000, INR)), 1)?;

    assert_eq!(handle.item_count()?, 1);

    Ok(())
}

#[test]
fn late_surface_starts_from_current_state() -> TestResult {
    let handle = CartHandle::new(CartStore::new(INR));

    handle.add_item(&Product::new(1, "Mug", Money::from_minor(20_000, INR)), 4)?;

    let badge = HeaderBadge::attach(&handle)?;
    let drawer = CartDrawer::attach(&handle)?;

    assert_eq!(badge.count(), 4);
    assert_eq!(drawer.lines().len(), 1);

    Ok(())
}
