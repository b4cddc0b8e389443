//! Checkout Example
//!
//! Loads a catalog, fills a cart and prints the cart drawer and checkout summary.
//!
//! Use `--add ID[xQTY]` to add products (repeatable)
//! Use `--set ID=QTY` to overwrite a line's quantity, `0` or less removes it
//! Use `--remove ID` to drop a line and `--clear` to empty the cart afterwards
//! Catalog, tax and shipping settings come from `StorefrontConfig` (see `--help`)

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use storefront::prelude::*;

/// Checkout example arguments
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Fill a cart and print the checkout")]
struct CheckoutArgs {
    /// Catalog, logging and checkout settings
    #[command(flatten)]
    config: StorefrontConfig,

    /// Product to add, optionally with a quantity (`3` or `3x2`)
    #[arg(long = "add", value_parser = parse_add)]
    adds: Vec<(ProductId, u32)>,

    /// Quantity to set for a product already in the cart (`3=5`)
    #[arg(long = "set", value_parser = parse_set)]
    sets: Vec<(ProductId, i64)>,

    /// Product to remove from the cart
    #[arg(long = "remove")]
    removes: Vec<u64>,

    /// Empty the cart after applying every other action
    #[arg(long)]
    clear: bool,
}

fn parse_add(s: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = s.split_once('x').unwrap_or((s, "1"));

    let id = id.trim().parse::<u64>().map_err(|err| format!("invalid product id: {err}"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid quantity: {err}"))?;

    Ok((ProductId::new(id), quantity))
}

fn parse_set(s: &str) -> Result<(ProductId, i64), String> {
    let Some((id, quantity)) = s.split_once('=') else {
        return Err(format!("expected ID=QTY, got `{s}`"));
    };

    let id = id.trim().parse::<u64>().map_err(|err| format!("invalid product id: {err}"))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid quantity: {err}"))?;

    Ok((ProductId::new(id), quantity))
}

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    _ = dotenvy::dotenv();

    let args = CheckoutArgs::parse();

    init_tracing(&args.config.logging)?;

    let catalog = match CatalogState::resolve(&FileCatalogSource::new(&args.config.catalog)) {
        CatalogState::Ready(catalog) => catalog,
        CatalogState::Failed(err) => return Err(err.into()),
        CatalogState::Loading => bail!("catalog did not load"),
    };

    let mut store = CartStore::new(catalog.currency());

    if let Some(max) = args.config.checkout.max_quantity {
        store = store.with_max_quantity(max);
    }

    let policy = args.config.checkout.policy(catalog.currency())?;
    let handle = CartHandle::new(store);

    let badge = HeaderBadge::attach(&handle)?;
    let drawer = CartDrawer::attach(&handle)?;
    let summary = CheckoutSummary::attach(&handle, policy)?;

    for (id, quantity) in &args.adds {
        let Some(product) = catalog.get(*id) else {
            println!("No product with id {id}");

            continue;
        };

        if let AddOutcome::Rejected(reason) = handle.add_item(product, *quantity)? {
            println!("Could not add {}: {reason:?}", product.name);
        }
    }

    for (id, quantity) in &args.sets {
        handle.set_quantity(*id, *quantity)?;
    }

    for id in &args.removes {
        drawer.remove(ProductId::new(*id))?;
    }

    if args.clear {
        drawer.clear()?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    println!("Cart badge: {}", badge.label().unwrap_or_default());

    drawer.write_to(&mut out)?;

    if !drawer.is_empty() {
        summary.write_to(&mut out)?;
    }

    Ok(())
}
