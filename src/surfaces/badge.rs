//! Header badge

use crate::{
    cart::{CartHandle, CartView},
    surfaces::{Attached, SurfaceError},
};

/// Cart icon counter in the page header.
#[derive(Debug)]
pub struct HeaderBadge {
    count: Attached<u64>,
}

impl HeaderBadge {
    /// Attach a badge to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if attached from inside a cart subscriber.
    pub fn attach(handle: &CartHandle) -> Result<Self, SurfaceError> {
        let count = Attached::new(handle, |view: &CartView<'_>| view.item_count())?;

        Ok(Self { count })
    }

    /// Total units in the cart.
    pub fn count(&self) -> u64 {
        *self.count.model()
    }

    /// Text shown on the badge; hidden while the cart is empty.
    pub fn label(&self) -> Option<String> {
        match self.count() {
            0 => None,
            count => Some(count.to_string()),
        }
    }
}
