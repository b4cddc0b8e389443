//! Cart subscriptions

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::cart::view::CartView;

new_key_type! {
    /// Subscription Key
    pub struct SubscriptionKey;
}

type Callback = Box<dyn FnMut(&CartView<'_>)>;

/// Callbacks run after every cart change, in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    callbacks: SlotMap<SubscriptionKey, Callback>,

    // Slot order follows slot reuse, not registration.
    order: Vec<SubscriptionKey>,
}

impl Subscribers {
    pub(crate) fn insert(&mut self, callback: Callback) -> SubscriptionKey {
        let key = self.callbacks.insert(callback);

        self.order.push(key);

        key
    }

    pub(crate) fn remove(&mut self, key: SubscriptionKey) -> bool {
        if self.callbacks.remove(key).is_none() {
            return false;
        }

        self.order.retain(|registered| *registered != key);

        true
    }

    pub(crate) fn notify(&mut self, view: &CartView<'_>) {
        for key in &self.order {
            if let Some(callback) = self.callbacks.get_mut(*key) {
                callback(view);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.callbacks.len())
            .finish()
    }
}
