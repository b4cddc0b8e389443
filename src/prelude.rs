//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        AddOutcome, CartError, CartHandle, CartStore, CartView, LineItem, QuantityOutcome,
        RejectReason, SubscriptionKey,
    },
    catalog::{
        Catalog, CatalogError, CatalogFormat, CatalogQuery, CatalogSource, CatalogState, Category,
        CategoryFilter, FileCatalogSource, SortOrder, StaticCatalogSource,
    },
    checkout::{CheckoutPolicy, CheckoutTotals},
    config::{CheckoutConfig, ConfigError, LogFormat, LoggingConfig, StorefrontConfig},
    observability::{ObservabilityError, init_tracing},
    pricing::PricingError,
    products::{Product, ProductId},
    surfaces::{CartDrawer, CheckoutSummary, HeaderBadge, SurfaceError},
};
