//! Wishlist store - keyed collection of saved artworks.

use crate::notify::{Notification, NotificationSink};
use crate::storage::Storage;
use crate::store::{CollectionStore, Keyed, LoadOutcome};
use crate::{Artwork, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the wishlist snapshot.
pub const WISHLIST_KEY: &str = "wishlist";

/// One saved artwork and when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub artwork: Artwork,
    /// Set once at insertion, never updated.
    pub added_at: Timestamp,
}

impl Keyed for WishlistEntry {
    fn key(&self) -> &str {
        &self.artwork.id
    }
}

/// The wishlist.
pub struct WishlistStore {
    inner: CollectionStore<WishlistEntry>,
    sink: Arc<dyn NotificationSink>,
}

impl WishlistStore {
    /// Open the wishlist, restoring any persisted snapshot.
    pub fn open(storage: Arc<dyn Storage>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            inner: CollectionStore::open(storage, WISHLIST_KEY),
            sink,
        }
    }

    /// What opening found under the wishlist's storage key.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.inner.load_outcome()
    }

    /// Current entries, in insertion order.
    pub fn entries(&self) -> &[WishlistEntry] {
        self.inner.items()
    }

    /// Whether the artwork is wishlisted.
    pub fn contains(&self, artwork_id: &str) -> bool {
        self.inner.contains(artwork_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the wishlist has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Add an artwork to the wishlist.
    ///
    /// Idempotent on the collection: adding an artwork that is already
    /// wishlisted leaves the entries untouched, though it still emits its
    /// own notification.
    pub fn add(&mut self, artwork: Artwork) {
        if self.inner.contains(&artwork.id) {
            self.sink.notify(Notification::new(
                "Already in wishlist",
                format!("\"{}\" is already in your wishlist.", artwork.title),
            ));
            return;
        }
        let title = artwork.title.clone();
        self.inner.push(WishlistEntry {
            artwork,
            added_at: Utc::now(),
        });
        self.sink.notify(Notification::new(
            "Added to wishlist",
            format!("\"{title}\" has been added to your wishlist."),
        ));
    }

    /// Remove an artwork from the wishlist. Silent no-op when absent.
    pub fn remove(&mut self, artwork_id: &str) {
        if self.inner.remove(artwork_id) {
            self.sink.notify(Notification::new(
                "Removed from wishlist",
                "The item has been removed from your wishlist.",
            ));
        }
    }

    /// Empty the wishlist.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.sink.notify(Notification::new(
            "Wishlist cleared",
            "All items have been removed from your wishlist.",
        ));
    }
}
