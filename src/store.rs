//! Generic persisted store cores.
//!
//! Two cardinalities share one pattern: [`CollectionStore`] holds an ordered,
//! key-unique sequence of values (cart, wishlist), [`SingletonStore`] holds
//! at most one record (user profile, settings). Both keep an in-memory
//! snapshot that always equals the last document written to [`Storage`]
//! under the store's fixed key: every mutation persists synchronously before
//! returning.
//!
//! Loading happens once, inside `open`. A store therefore never exists in an
//! uninitialized state and mutations cannot race the initial load.
//!
//! Mutations never return errors. A failed write is logged and the in-memory
//! snapshot stays authoritative for the rest of the session.

use crate::storage::Storage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Values that carry their own collection key.
pub trait Keyed {
    /// The key this value is unique by within its collection.
    fn key(&self) -> &str;
}

/// What `open` found under the store's storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No document under the key; started from the default state.
    Fresh,
    /// A document was present and parsed; snapshot restored from it.
    Restored,
    /// A document was present but unparseable; discarded, default state used.
    Corrupted,
}

/// Load and classify the document under a key.
pub(crate) fn load_document<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> (Option<T>, LoadOutcome) {
    let Some(raw) = storage.read(key) else {
        return (None, LoadOutcome::Fresh);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => (Some(value), LoadOutcome::Restored),
        Err(err) => {
            tracing::warn!(key, %err, "stored document is corrupted, falling back to default");
            (None, LoadOutcome::Corrupted)
        }
    }
}

/// Persist a snapshot, absorbing write failures.
pub(crate) fn commit<T: Serialize>(storage: &dyn Storage, key: &str, snapshot: &T) {
    match serde_json::to_string(snapshot) {
        Ok(raw) => {
            if let Err(err) = storage.write(key, &raw) {
                tracing::warn!(key, %err, "failed to persist snapshot");
            }
        }
        Err(err) => tracing::warn!(key, %err, "failed to serialize snapshot"),
    }
}

/// Ordered, key-unique collection with write-through persistence.
///
/// Insertion order is preserved; in-place updates do not reorder. Policy for
/// duplicate keys (increment vs no-op) belongs to the wrapping store, which
/// checks [`contains`](Self::contains) before [`push`](Self::push).
pub struct CollectionStore<T> {
    key: &'static str,
    items: Vec<T>,
    storage: Arc<dyn Storage>,
    outcome: LoadOutcome,
}

impl<T> CollectionStore<T>
where
    T: Keyed + Serialize + DeserializeOwned,
{
    /// Open the store, loading the snapshot persisted under `key`.
    ///
    /// Absent or corrupted documents fall back to the empty collection; the
    /// distinction is reported through [`load_outcome`](Self::load_outcome),
    /// never as an error.
    pub fn open(storage: Arc<dyn Storage>, key: &'static str) -> Self {
        let (items, outcome) = load_document(storage.as_ref(), key);
        Self {
            key,
            items: items.unwrap_or_default(),
            storage,
            outcome,
        }
    }

    /// What `open` found under this store's key.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// The storage key this store writes to.
    pub fn storage_key(&self) -> &'static str {
        self.key
    }

    /// Current snapshot, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of elements (distinct keys).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the element with the given key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Whether an element with the given key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Append a new element and persist.
    ///
    /// The caller must have established that no element shares this key;
    /// the key-uniqueness invariant is checked in debug builds.
    pub fn push(&mut self, item: T) {
        debug_assert!(!self.contains(item.key()), "duplicate collection key");
        self.items.push(item);
        self.persist();
    }

    /// Mutate the element with the given key in place and persist.
    ///
    /// Returns false (and does not persist) when the key is absent. The
    /// element keeps its position in the ordering.
    pub fn update<F: FnOnce(&mut T)>(&mut self, key: &str, f: F) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.key() == key) else {
            return false;
        };
        f(item);
        self.persist();
        true
    }

    /// Remove the element with the given key and persist.
    ///
    /// Silent no-op (no persist) when the key is absent; returns whether an
    /// element was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Empty the collection and persist.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&self) {
        commit(self.storage.as_ref(), self.key, &self.items);
    }
}

/// At-most-one-record store with write-through persistence.
///
/// Clearing the record removes the storage key entirely rather than writing
/// an empty document.
pub struct SingletonStore<T> {
    key: &'static str,
    value: Option<T>,
    storage: Arc<dyn Storage>,
    outcome: LoadOutcome,
}

impl<T> SingletonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the store, loading the record persisted under `key` if any.
    pub fn open(storage: Arc<dyn Storage>, key: &'static str) -> Self {
        let (value, outcome) = load_document(storage.as_ref(), key);
        Self {
            key,
            value,
            storage,
            outcome,
        }
    }

    /// What `open` found under this store's key.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// The current record, if present.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether a record is present.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Replace the record wholesale and persist.
    ///
    /// `Some` overwrites the stored document; `None` deletes the storage key,
    /// so a later load finds the key absent rather than an empty object.
    pub fn replace(&mut self, value: Option<T>) {
        self.value = value;
        match &self.value {
            Some(value) => commit(self.storage.as_ref(), self.key, value),
            None => {
                if let Err(err) = self.storage.remove(self.key) {
                    tracing::warn!(key = self.key, %err, "failed to remove stored document");
                }
            }
        }
    }

    /// Mutate the record in place and persist.
    ///
    /// Silent no-op when no record is present; returns whether a record was
    /// mutated.
    pub fn modify<F: FnOnce(&mut T)>(&mut self, f: F) -> bool {
        let Some(value) = self.value.as_mut() else {
            return false;
        };
        f(value);
        commit(self.storage.as_ref(), self.key, value);
        true
    }
}
