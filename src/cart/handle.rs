//! Shared cart handle

use std::{cell::RefCell, rc::Rc};

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{AddOutcome, CartError, CartStore, CartView, QuantityOutcome, SubscriptionKey},
    products::{Product, ProductId},
};

/// Cloneable handle to the session's single cart store.
///
/// Every surface holds a clone of the same handle. A mutation attempted while
/// the store is already borrowed (from inside a subscriber callback) is
/// refused with [`CartError::Busy`] and leaves the cart untouched.
#[derive(Debug, Clone)]
pub struct CartHandle {
    store: Rc<RefCell<CartStore>>,
    detached: Rc<RefCell<Vec<SubscriptionKey>>>,
}

impl CartHandle {
    /// Share `store` between surfaces.
    #[must_use]
    pub fn new(store: CartStore) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
            detached: Rc::default(),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> Result<R, CartError> {
        let mut store = self.store.try_borrow_mut().map_err(|err| {
            tracing::warn!(error = %err, "cart mutation attempted while notifying subscribers");

            CartError::Busy
        })?;

        self.prune(&mut store);

        let result = f(&mut *store);

        self.prune(&mut store);

        Ok(result)
    }

    fn prune(&self, store: &mut CartStore) {
        for key in self.detached.take() {
            store.unsubscribe(key);
        }
    }

    /// Read the current state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called while the cart is being changed.
    pub fn read<R>(&self, f: impl FnOnce(&CartView<'_>) -> R) -> Result<R, CartError> {
        let store = self.store.try_borrow().map_err(|_err| CartError::Busy)?;

        Ok(f(&store.view()))
    }

    /// See [`CartStore::add_item`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<AddOutcome, CartError> {
        self.write(|store| store.add_item(product, quantity))
    }

    /// See [`CartStore::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn remove_item(&self, product_id: ProductId) -> Result<bool, CartError> {
        self.write(|store| store.remove_item(product_id))
    }

    /// See [`CartStore::set_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn set_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<QuantityOutcome, CartError> {
        self.write(|store| store.set_quantity(product_id, quantity))
    }

    /// See [`CartStore::increment`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn increment(&self, product_id: ProductId) -> Result<QuantityOutcome, CartError> {
        self.write(|store| store.increment(product_id))
    }

    /// See [`CartStore::decrement`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn decrement(&self, product_id: ProductId) -> Result<QuantityOutcome, CartError> {
        self.write(|store| store.decrement(product_id))
    }

    /// See [`CartStore::clear`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn clear(&self) -> Result<usize, CartError> {
        self.write(CartStore::clear)
    }

    /// Subscribe to changes, immediately calling `callback` once with the current state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn subscribe(
        &self,
        mut callback: impl FnMut(&CartView<'_>) + 'static,
    ) -> Result<SubscriptionKey, CartError> {
        self.write(|store| {
            callback(&store.view());

            store.subscribe(callback)
        })
    }

    /// Remove a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called from inside a subscriber.
    pub fn unsubscribe(&self, key: SubscriptionKey) -> Result<bool, CartError> {
        self.write(|store| store.unsubscribe(key))
    }

    /// Remove a subscription without failing.
    ///
    /// While the cart is busy, for instance when called from inside a
    /// subscriber, removal is deferred until the change in progress has
    /// finished notifying.
    pub fn detach(&self, key: SubscriptionKey) {
        match self.store.try_borrow_mut() {
            Ok(mut store) => {
                self.prune(&mut store);
                store.unsubscribe(key);
            }
            Err(_err) => {
                tracing::debug!(?key, "deferring unsubscribe until the cart is idle");

                self.detached.borrow_mut().push(key);
            }
        }
    }

    /// Number of active subscriptions, not counting deferred removals.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called while the cart is being changed.
    pub fn subscriber_count(&self) -> Result<usize, CartError> {
        let store = self.store.try_borrow().map_err(|_err| CartError::Busy)?;
        let pending = self.detached.borrow().len();

        Ok(store.subscriber_count().saturating_sub(pending))
    }

    /// Sum of all quantities.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] if called while the cart is being changed.
    pub fn item_count(&self) -> Result<u64, CartError> {
        self.read(|view| view.item_count())
    }

    /// Sum of price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Busy`] while the cart is being changed, or
    /// [`CartError::Pricing`] if the total overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, CartError> {
        self.read(|view| view.subtotal())?.map_err(CartError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    fn kettle() -> Product {
        Product::new(1, "Kettle", Money::from_minor(149_900, INR))
    }

    #[test]
    fn clones_share_one_store() -> TestResult {
        let badge = CartHandle::new(CartStore::new(INR));
        let drawer = badge.clone();

        badge.add_item(&kettle(), 2)?;

        assert_eq!(drawer.item_count()?, 2);
        assert_eq!(drawer.subtotal()?, Money::from_minor(299_800, INR));

        Ok(())
    }

    #[test]
    fn subscribe_delivers_current_state_first() -> TestResult {
        let handle = CartHandle::new(CartStore::new(INR));
        handle.add_item(&kettle(), 3)?;

        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);

        handle.subscribe(move |view| sink.set(view.item_count()))?;

        assert_eq!(seen.get(), 3);

        handle.clear()?;

        assert_eq!(seen.get(), 0);

        Ok(())
    }

    #[test]
    fn mutation_from_subscriber_is_refused() -> TestResult {
        let handle = CartHandle::new(CartStore::new(INR));
        let inner = handle.clone();
        let refused = Rc::new(Cell::new(false));
        let flag = Rc::clone(&refused);

        handle.subscribe(move |view| {
            if !view.is_empty() {
                flag.set(inner.clear() == Err(CartError::Busy));
            }
        })?;

        handle.add_item(&kettle(), 1)?;

        assert!(refused.get());
        assert_eq!(handle.item_count()?, 1);

        Ok(())
    }
}
