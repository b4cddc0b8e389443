//! Surfaces
//!
//! Reference presentation surfaces over the shared cart. Each one keeps a
//! render model that is rebuilt from the [`CartView`] pushed to it on every
//! change, and routes user actions back through the [`CartHandle`].

use std::{
    cell::{Ref, RefCell},
    io,
    rc::Rc,
};

use thiserror::Error;

use crate::{
    cart::{CartError, CartHandle, CartView, SubscriptionKey},
    pricing::PricingError,
};

pub mod badge;
pub mod drawer;
pub mod summary;

pub use badge::HeaderBadge;
pub use drawer::{CartDrawer, DrawerLine};
pub use summary::CheckoutSummary;

/// Errors raised by surfaces.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The cart refused the operation.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing rendered output failed.
    #[error("failed to write surface output: {0}")]
    Io(#[from] io::Error),
}

/// A render model kept in sync with the cart for as long as it is alive.
///
/// Dropping it removes the subscription, once the cart is no longer busy.
#[derive(Debug)]
pub(crate) struct Attached<M> {
    handle: CartHandle,
    model: Rc<RefCell<M>>,
    key: SubscriptionKey,
}

impl<M: 'static> Attached<M> {
    /// Build the model from the current cart and rebuild it on every change.
    pub(crate) fn new(
        handle: &CartHandle,
        build: impl Fn(&CartView<'_>) -> M + 'static,
    ) -> Result<Self, CartError> {
        let model = Rc::new(RefCell::new(handle.read(&build)?));
        let sink = Rc::clone(&model);

        let key = handle.subscribe(move |view| *sink.borrow_mut() = build(view))?;

        Ok(Self {
            handle: handle.clone(),
            model,
            key,
        })
    }
}

impl<M> Attached<M> {
    pub(crate) fn model(&self) -> Ref<'_, M> {
        self.model.borrow()
    }

    pub(crate) fn handle(&self) -> &CartHandle {
        &self.handle
    }
}

impl<M> Drop for Attached<M> {
    fn drop(&mut self) {
        self.handle.detach(self.key);
    }
}
