//! Storefront
//!
//! Catalog browsing, a session-wide shopping cart and checkout totals for a
//! storefront backed by a static product file.
//!
//! The [`cart::CartStore`] is the single source of truth for cart contents.
//! Surfaces share it through a [`cart::CartHandle`], read it through
//! [`cart::CartView`] snapshots pushed to their subscriptions, and change it
//! only through its operations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod surfaces;
