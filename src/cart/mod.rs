//! Cart
//!
//! The cart store is the only owner of the session's line items. Surfaces
//! read it through [`CartView`] snapshots and change it only through the
//! store's operations; every change is pushed synchronously to all
//! subscribers before the operation returns.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::PricingError,
    products::{Product, ProductId},
};

pub mod handle;
pub mod line_item;
pub mod subscriptions;
pub mod view;

pub use handle::CartHandle;
pub use line_item::LineItem;
pub use subscriptions::SubscriptionKey;
pub use view::CartView;

use subscriptions::Subscribers;

/// Errors surfaced by the shared cart handle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The cart was changed from inside one of its own subscribers.
    #[error("cart is busy notifying subscribers")]
    Busy,

    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Why an add was refused. The cart is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The product is not in stock.
    OutOfStock,

    /// Zero units were requested.
    ZeroQuantity,

    /// The product is priced in a different currency from the cart.
    CurrencyMismatch,

    /// The line is already at the per-item maximum.
    QuantityLimit,
}

/// Result of [`CartStore::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Inserted {
        /// Quantity on the new line
        quantity: NonZeroU32,
    },

    /// The product was already in the cart; its quantity grew.
    Merged {
        /// Quantity on the line after the add
        quantity: NonZeroU32,
    },

    /// Nothing changed.
    Rejected(RejectReason),
}

/// Result of [`CartStore::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    /// The line now holds the given quantity.
    Updated(NonZeroU32),

    /// The quantity dropped to zero or below, so the line was removed.
    Removed,

    /// The line already held that quantity.
    Unchanged,

    /// No line exists for the product.
    NotInCart,
}

/// Cart store
#[derive(Debug)]
pub struct CartStore {
    currency: &'static Currency,
    items: Vec<LineItem>,
    max_quantity: Option<NonZeroU32>,
    subscribers: Subscribers,
}

impl CartStore {
    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
            max_quantity: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Cap every line at `max` units. Uncapped by default.
    #[must_use]
    pub fn with_max_quantity(mut self, max: NonZeroU32) -> Self {
        self.max_quantity = Some(max);
        self
    }

    /// Add `quantity` units of `product`, merging into an existing line for the same product.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> AddOutcome {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return Self::reject(product.id, RejectReason::ZeroQuantity);
        };

        if !product.is_purchasable() {
            return Self::reject(product.id, RejectReason::OutOfStock);
        }

        if product.price.currency() != self.currency {
            return Self::reject(product.id, RejectReason::CurrencyMismatch);
        }

        let max_quantity = self.max_quantity;

        let outcome = if let Some(line) = self.line_mut(product.id) {
            let current = line.quantity();
            let merged = clamp(current.saturating_add(quantity.get()), max_quantity);

            if merged == current {
                return Self::reject(product.id, RejectReason::QuantityLimit);
            }

            line.set_quantity(merged);

            AddOutcome::Merged { quantity: merged }
        } else {
            let quantity = clamp(quantity, max_quantity);

            self.items.push(LineItem::from_product(product, quantity));

            AddOutcome::Inserted { quantity }
        };

        tracing::debug!(product_id = %product.id, ?outcome, "added item to cart");

        self.notify();

        outcome
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &Product) -> AddOutcome {
        self.add_item(product, 1)
    }

    /// Remove the line for `product_id` whatever its quantity.
    ///
    /// Returns `false`, without notifying, if there was no such line.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let Some(position) = self.position(product_id) else {
            return false;
        };

        self.items.remove(position);

        tracing::debug!(%product_id, "removed item from cart");

        self.notify();

        true
    }

    /// Set the quantity for `product_id` exactly. Zero or below removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> QuantityOutcome {
        if self.position(product_id).is_none() {
            return QuantityOutcome::NotInCart;
        }

        let Some(quantity) = positive_quantity(quantity) else {
            self.remove_item(product_id);

            return QuantityOutcome::Removed;
        };

        let quantity = clamp(quantity, self.max_quantity);

        let Some(line) = self.line_mut(product_id) else {
            return QuantityOutcome::NotInCart;
        };

        if line.quantity() == quantity {
            return QuantityOutcome::Unchanged;
        }

        line.set_quantity(quantity);

        tracing::debug!(%product_id, quantity = quantity.get(), "set cart item quantity");

        self.notify();

        QuantityOutcome::Updated(quantity)
    }

    /// Add one unit to an existing line.
    pub fn increment(&mut self, product_id: ProductId) -> QuantityOutcome {
        match self.get(product_id) {
            Some(line) => {
                let next = i64::from(line.quantity().get()).saturating_add(1);

                self.set_quantity(product_id, next)
            }
            None => QuantityOutcome::NotInCart,
        }
    }

    /// Take one unit off an existing line, removing it at zero.
    pub fn decrement(&mut self, product_id: ProductId) -> QuantityOutcome {
        match self.get(product_id) {
            Some(line) => {
                let next = i64::from(line.quantity().get()) - 1;

                self.set_quantity(product_id, next)
            }
            None => QuantityOutcome::NotInCart,
        }
    }

    /// Empty the cart. Returns how many lines were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();

        if removed == 0 {
            return 0;
        }

        self.items.clear();

        tracing::debug!(removed, "cleared cart");

        self.notify();

        removed
    }

    /// Register a callback run after every change to the cart.
    pub fn subscribe(&mut self, callback: impl FnMut(&CartView<'_>) + 'static) -> SubscriptionKey {
        self.subscribers.insert(Box::new(callback))
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.remove(key)
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Snapshot of the current state.
    pub fn view(&self) -> CartView<'_> {
        CartView::new(&self.items, self.currency)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `product_id`, if present.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.view().get(product_id)
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.view().item_count()
    }

    /// Sum of price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        self.view().subtotal()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency the cart is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|line| line.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    fn reject(product_id: ProductId, reason: RejectReason) -> AddOutcome {
        tracing::warn!(%product_id, ?reason, "rejected add to cart");

        AddOutcome::Rejected(reason)
    }

    fn notify(&mut self) {
        let view = CartView::new(&self.items, self.currency);

        self.subscribers.notify(&view);
    }
}

fn clamp(quantity: NonZeroU32, max: Option<NonZeroU32>) -> NonZeroU32 {
    max.map_or(quantity, |max| quantity.min(max))
}

fn positive_quantity(quantity: i64) -> Option<NonZeroU32> {
    if quantity <= 0 {
        return None;
    }

    NonZeroU32::new(u32::try_from(quantity).unwrap_or(u32::MAX))
}
