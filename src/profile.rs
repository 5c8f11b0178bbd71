//! User profile store - singleton record with purchase history.
//!
//! The profile is present while a user is logged in and absent otherwise;
//! logging out removes the persisted document entirely. Purchases are
//! prepended to the history, newest first, and are immutable once created.

use crate::cart::CartLine;
use crate::notify::{Notification, NotificationSink};
use crate::storage::Storage;
use crate::store::{LoadOutcome, SingletonStore};
use crate::Timestamp;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the user profile document.
pub const USER_KEY: &str = "user";

/// Prefix of every order identifier.
pub const ORDER_ID_PREFIX: &str = "PH";

/// Generate an order identifier: prefix, the last six digits of the current
/// epoch-millisecond timestamp, and a four-digit random component.
///
/// Uniqueness is probabilistic, not guaranteed; collisions within a session
/// are astronomically unlikely but possible.
pub fn generate_order_id() -> String {
    let timestamp = Utc::now().timestamp_millis().rem_euclid(1_000_000);
    let random: u32 = rand::rng().random_range(0..10_000);
    format!("{ORDER_ID_PREFIX}-{timestamp:06}-{random:04}")
}

/// A completed order: a snapshot copy of the cart at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Cart lines as they were at checkout, copied, not referenced.
    pub items: Vec<CartLine>,
    /// Order total at checkout.
    pub total: f64,
    /// When the order was placed.
    pub purchase_date: Timestamp,
    /// Human-readable order token, see [`generate_order_id`].
    pub order_id: String,
}

impl Purchase {
    /// Build a purchase from the given cart lines and total, stamped now.
    pub fn new(items: Vec<CartLine>, total: f64) -> Self {
        Self {
            items,
            total,
            purchase_date: Utc::now(),
            order_id: generate_order_id(),
        }
    }
}

/// The logged-in user's profile.
///
/// Stored documents from older clients may carry an extra `wishlist` field;
/// it was never read back and is dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Avatar URL or data URI.
    pub avatar: String,
    pub email: String,
    /// Purchase history, newest first.
    pub purchases: Vec<Purchase>,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
}

/// The user profile store.
pub struct UserStore {
    inner: SingletonStore<User>,
    sink: Arc<dyn NotificationSink>,
}

impl UserStore {
    /// Open the store, restoring any persisted profile.
    pub fn open(storage: Arc<dyn Storage>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            inner: SingletonStore::open(storage, USER_KEY),
            sink,
        }
    }

    /// What opening found under the user's storage key.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.inner.load_outcome()
    }

    /// The current profile, if logged in.
    pub fn user(&self) -> Option<&User> {
        self.inner.get()
    }

    /// Whether a user is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.inner.is_present()
    }

    /// Log a user in, replacing any previous profile wholesale.
    pub fn login(&mut self, user: User) {
        let username = user.username.clone();
        self.inner.replace(Some(user));
        self.sink.notify(Notification::new(
            "Logged in",
            format!("Welcome back, {username}!"),
        ));
    }

    /// Log out, removing the persisted profile document.
    pub fn logout(&mut self) {
        self.inner.replace(None);
        self.sink.notify(Notification::new(
            "Logged out",
            "You have been logged out successfully.",
        ));
    }

    /// Shallow-merge profile fields. Silent no-op when logged out.
    pub fn update_profile(&mut self, patch: UserPatch) {
        let updated = self.inner.modify(|user| {
            if let Some(username) = patch.username {
                user.username = username;
            }
            if let Some(avatar) = patch.avatar {
                user.avatar = avatar;
            }
            if let Some(email) = patch.email {
                user.email = email;
            }
        });
        if updated {
            self.sink.notify(Notification::new(
                "Profile updated",
                "Your profile has been updated successfully.",
            ));
        }
    }

    /// Prepend a purchase to the history. Silent no-op when logged out.
    pub fn add_purchase(&mut self, purchase: Purchase) {
        let order_id = purchase.order_id.clone();
        let added = self.inner.modify(|user| {
            user.purchases.insert(0, purchase);
        });
        if added {
            self.sink.notify(Notification::new(
                "Purchase complete",
                format!("Order #{order_id} has been placed successfully."),
            ));
        }
    }
}
