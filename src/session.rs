//! Session - the application context holding the four stores.
//!
//! One session exists per running application. It constructs each store once
//! over a shared storage backend and notification sink, injected explicitly
//! so tests can hand in a fresh [`MemoryStorage`](crate::MemoryStorage) and a
//! [`RecordingSink`](crate::RecordingSink). The stores stay fully
//! independent: each owns its own storage key and never observes another
//! store's in-flight state.

use crate::cart::CartStore;
use crate::notify::NotificationSink;
use crate::profile::{Purchase, UserStore};
use crate::settings::SettingsStore;
use crate::storage::Storage;
use crate::wishlist::WishlistStore;
use std::sync::Arc;
use std::time::Duration;

/// A storefront session: cart, wishlist, user profile and settings.
pub struct Session {
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub user: UserStore,
    pub settings: SettingsStore,
    checkout_delay: Duration,
}

impl Session {
    /// Open a session, loading all four stores from the given storage.
    pub fn open(storage: Arc<dyn Storage>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            cart: CartStore::open(storage.clone(), sink.clone()),
            wishlist: WishlistStore::open(storage.clone(), sink.clone()),
            user: UserStore::open(storage.clone(), sink.clone()),
            settings: SettingsStore::open(storage, sink),
            checkout_delay: Duration::ZERO,
        }
    }

    /// Pause checkout for the given duration before completing, reproducing
    /// the storefront's artificial processing pacing. Defaults to zero.
    pub fn with_checkout_delay(mut self, delay: Duration) -> Self {
        self.checkout_delay = delay;
        self
    }

    /// Complete a checkout.
    ///
    /// Builds a [`Purchase`] from a snapshot copy of the cart, prepends it to
    /// the logged-in user's history (silently skipped when logged out),
    /// clears the cart and returns the purchase. An empty cart checks out to
    /// `None` with no side effects.
    pub fn checkout(&mut self) -> Option<Purchase> {
        if self.cart.is_empty() {
            return None;
        }

        if !self.checkout_delay.is_zero() {
            std::thread::sleep(self.checkout_delay);
        }

        let purchase = Purchase::new(self.cart.lines().to_vec(), self.cart.total());
        self.user.add_purchase(purchase.clone());
        self.cart.clear();
        Some(purchase)
    }
}
