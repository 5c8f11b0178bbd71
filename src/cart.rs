//! Cart store - keyed collection of artwork lines with quantities.

use crate::notify::{Notification, NotificationSink};
use crate::storage::Storage;
use crate::store::{CollectionStore, Keyed, LoadOutcome};
use crate::Artwork;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the cart snapshot.
pub const CART_KEY: &str = "cart";

/// One cart line: an artwork and how many of it.
///
/// Quantity is always >= 1 while the line is in the cart; setting it to zero
/// or below removes the line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub artwork: Artwork,
    pub quantity: i64,
}

impl Keyed for CartLine {
    fn key(&self) -> &str {
        &self.artwork.id
    }
}

/// The shopping cart.
pub struct CartStore {
    inner: CollectionStore<CartLine>,
    sink: Arc<dyn NotificationSink>,
}

impl CartStore {
    /// Open the cart, restoring any persisted snapshot.
    pub fn open(storage: Arc<dyn Storage>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            inner: CollectionStore::open(storage, CART_KEY),
            sink,
        }
    }

    /// What opening found under the cart's storage key.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.inner.load_outcome()
    }

    /// Current cart lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.inner.items()
    }

    /// The line for an artwork, if carted.
    pub fn get(&self, artwork_id: &str) -> Option<&CartLine> {
        self.inner.get(artwork_id)
    }

    /// Whether the artwork is in the cart.
    pub fn contains(&self, artwork_id: &str) -> bool {
        self.inner.contains(artwork_id)
    }

    /// Number of distinct cart lines.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Add an artwork to the cart.
    ///
    /// An artwork already in the cart has its quantity incremented by one;
    /// otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, artwork: Artwork) {
        if self.inner.contains(&artwork.id) {
            let mut new_quantity = 0;
            self.inner.update(&artwork.id, |line| {
                line.quantity += 1;
                new_quantity = line.quantity;
            });
            self.sink.notify(Notification::new(
                "Item already in cart",
                format!(
                    "Increased quantity of \"{}\" to {}",
                    artwork.title, new_quantity
                ),
            ));
        } else {
            let title = artwork.title.clone();
            self.inner.push(CartLine {
                artwork,
                quantity: 1,
            });
            self.sink.notify(Notification::new(
                "Added to cart",
                format!("\"{title}\" has been added to your cart."),
            ));
        }
    }

    /// Remove an artwork's line from the cart. Silent no-op when absent.
    pub fn remove(&mut self, artwork_id: &str) {
        if self.inner.remove(artwork_id) {
            self.sink.notify(Notification::new(
                "Removed from cart",
                "The item has been removed from your cart.",
            ));
        }
    }

    /// Set the quantity of an artwork's line.
    ///
    /// A quantity of zero or below means "not in cart" and delegates to
    /// [`remove`](Self::remove); it is never stored. Silent no-op when the
    /// artwork is not carted.
    pub fn update_quantity(&mut self, artwork_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(artwork_id);
            return;
        }
        let mut title = String::new();
        if self.inner.update(artwork_id, |line| {
            line.quantity = quantity;
            title = line.artwork.title.clone();
        }) {
            self.sink.notify(Notification::new(
                "Cart updated",
                format!("Quantity of \"{title}\" set to {quantity}."),
            ));
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.sink.notify(Notification::new(
            "Cart cleared",
            "All items have been removed from your cart.",
        ));
    }

    /// Sum of price x quantity over all lines. Recomputed on each call.
    pub fn total(&self) -> f64 {
        self.lines()
            .iter()
            .map(|line| line.artwork.price * line.quantity as f64)
            .sum()
    }

    /// Sum of quantities over all lines. Recomputed on each call.
    pub fn count(&self) -> i64 {
        self.lines().iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::sample;
    use crate::notify::RecordingSink;
    use crate::storage::MemoryStorage;

    fn open_cart(storage: &MemoryStorage, sink: &RecordingSink) -> CartStore {
        CartStore::open(Arc::new(storage.clone()), Arc::new(sink.clone()))
    }

    #[test]
    fn add_twice_increments_quantity() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.add(sample("a1", 10.0));
        cart.add(sample("a1", 10.0));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("a1").unwrap().quantity, 2);
        assert_eq!(cart.total(), 20.0);
        assert_eq!(cart.count(), 2);

        let seen = sink.notifications();
        assert_eq!(seen[0].title, "Added to cart");
        assert_eq!(seen[1].title, "Item already in cart");
    }

    #[test]
    fn lines_keep_insertion_order() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.add(sample("a1", 1.0));
        cart.add(sample("a2", 2.0));
        cart.add(sample("a3", 3.0));
        cart.update_quantity("a2", 5);

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.artwork.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
        assert_eq!(cart.get("a2").unwrap().quantity, 5);
    }

    #[test]
    fn quantity_zero_removes_the_line() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.add(sample("a1", 10.0));
        cart.update_quantity("a1", 0);

        assert!(cart.is_empty());
        assert_eq!(sink.notifications().last().unwrap().title, "Removed from cart");
    }

    #[test]
    fn negative_quantity_removes_the_line() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.add(sample("a1", 10.0));
        cart.update_quantity("a1", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_absent_emits_nothing() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.remove("ghost");
        assert!(sink.is_empty());
    }

    #[test]
    fn update_quantity_of_absent_artwork_is_noop() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.update_quantity("ghost", 4);
        assert!(cart.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn clear_zeroes_aggregates() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.add(sample("a1", 10.0));
        cart.add(sample("a2", 5.5));
        cart.clear();

        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.count(), 0);
        assert_eq!(sink.notifications().last().unwrap().title, "Cart cleared");
    }

    #[test]
    fn totals_combine_price_and_quantity() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);

        cart.add(sample("a1", 10.0));
        cart.add(sample("a2", 2.5));
        cart.update_quantity("a2", 4);

        assert_eq!(cart.total(), 10.0 + 2.5 * 4.0);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn snapshot_survives_reopen() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        {
            let mut cart = open_cart(&storage, &sink);
            cart.add(sample("a1", 10.0));
            cart.add(sample("a1", 10.0));
        }

        let reopened = open_cart(&storage, &sink);
        assert_eq!(reopened.load_outcome(), LoadOutcome::Restored);
        assert_eq!(reopened.count(), 2);
        assert_eq!(reopened.total(), 20.0);
    }

    #[test]
    fn corrupted_snapshot_starts_empty() {
        let storage = MemoryStorage::new();
        storage.write(CART_KEY, "{not json").unwrap();
        let sink = RecordingSink::new();

        let cart = open_cart(&storage, &sink);
        assert!(cart.is_empty());
        assert_eq!(cart.load_outcome(), LoadOutcome::Corrupted);
    }

    #[test]
    fn wire_shape_is_artwork_and_quantity() {
        let storage = MemoryStorage::new();
        let sink = RecordingSink::new();
        let mut cart = open_cart(&storage, &sink);
        cart.add(sample("a1", 10.0));

        let raw = storage.read(CART_KEY).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc[0]["quantity"], 1);
        assert_eq!(doc[0]["artwork"]["id"], "a1");
    }

    // Property-based checks for the cart invariants.
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// One caller action against the cart.
        #[derive(Debug, Clone)]
        enum Action {
            Add(u8),
            Remove(u8),
            SetQuantity(u8, i64),
            Clear,
        }

        fn arb_action() -> impl Strategy<Value = Action> {
            prop_oneof![
                (0u8..5).prop_map(Action::Add),
                (0u8..5).prop_map(Action::Remove),
                ((0u8..5), -3i64..10).prop_map(|(id, q)| Action::SetQuantity(id, q)),
                Just(Action::Clear),
            ]
        }

        proptest! {
            #[test]
            fn quantities_stay_positive_and_aggregates_agree(
                actions in proptest::collection::vec(arb_action(), 0..40)
            ) {
                let storage = MemoryStorage::new();
                let sink = RecordingSink::new();
                let mut cart = open_cart(&storage, &sink);

                for action in actions {
                    match action {
                        Action::Add(id) => cart.add(sample(&format!("a{id}"), f64::from(id) + 1.0)),
                        Action::Remove(id) => cart.remove(&format!("a{id}")),
                        Action::SetQuantity(id, q) => cart.update_quantity(&format!("a{id}"), q),
                        Action::Clear => cart.clear(),
                    }

                    prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));

                    let expected_total: f64 = cart
                        .lines()
                        .iter()
                        .map(|l| l.artwork.price * l.quantity as f64)
                        .sum();
                    let expected_count: i64 = cart.lines().iter().map(|l| l.quantity).sum();
                    prop_assert_eq!(cart.total(), expected_total);
                    prop_assert_eq!(cart.count(), expected_count);

                    // Snapshot always equals the last durable write (the key
                    // is unwritten only while every action so far was a no-op).
                    if let Some(raw) = storage.read(CART_KEY) {
                        let persisted: Vec<CartLine> = serde_json::from_str(&raw).unwrap();
                        prop_assert_eq!(&persisted, cart.lines());
                    } else {
                        prop_assert!(cart.is_empty());
                    }
                }
            }
        }
    }
}
