//! # PixelHaven Store
//!
//! Persisted state stores for a client-only digital-art storefront.
//!
//! This crate provides the state layer behind cart, wishlist, user-profile
//! and settings management: in-memory snapshots with write-through
//! persistence to a local key-value boundary, plus advisory notifications
//! for every mutation.
//!
//! ## Design Principles
//!
//! - **Write-through**: every mutation persists synchronously; the snapshot
//!   always equals the last durable write
//! - **Fail soft**: absent or corrupted stored documents fall back to the
//!   default state and are logged, never raised
//! - **Never throw on mutation**: mutating operations do not return errors;
//!   persistence failures are absorbed and logged
//! - **Injected, not ambient**: storage and notification sinks are passed in
//!   explicitly, so every test can run against a fresh in-memory backend
//!
//! ## Core Concepts
//!
//! ### Stores
//!
//! Two generic cores carry the pattern: [`CollectionStore`] for ordered,
//! key-unique collections and [`SingletonStore`] for at-most-one records.
//! Four concrete stores instantiate them:
//! - [`CartStore`] - artwork lines with quantities, duplicate adds increment
//! - [`WishlistStore`] - saved artworks, duplicate adds are no-ops
//! - [`UserStore`] - the logged-in profile with newest-first purchase history
//! - [`SettingsStore`] - display preferences with a fixed default record
//!
//! ### Storage
//!
//! The [`Storage`] trait is the durability boundary: one JSON document per
//! key, last-write-wins, no cross-key coordination. [`FileStorage`] keeps one
//! `<key>.json` file per key; [`MemoryStorage`] backs tests and ephemeral
//! sessions. Document shapes stay drop-in compatible with the original
//! storefront's persisted data.
//!
//! ### Notifications
//!
//! Each successful mutation emits exactly one [`Notification`] through a
//! [`NotificationSink`], fire-and-forget. Reads and silent no-ops emit
//! nothing.
//!
//! ## Quick Start
//!
//! ```rust
//! use pixelhaven_store::{Artwork, MemoryStorage, RecordingSink, Session};
//! use std::sync::Arc;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let sink = RecordingSink::new();
//! let mut session = Session::open(storage, Arc::new(sink.clone()));
//!
//! let artwork = Artwork {
//!     id: "a1".to_string(),
//!     title: "Neon Skyline".to_string(),
//!     artist: "Pixel Painter".to_string(),
//!     price: 24.99,
//!     description: "A synthwave cityscape".to_string(),
//!     image_url: "https://example.com/a1.png".to_string(),
//!     dimensions: "64x64px".to_string(),
//!     category: "pixel".to_string(),
//!     tags: vec!["synthwave".to_string()],
//!     created_at: chrono::Utc::now(),
//! };
//!
//! session.cart.add(artwork.clone());
//! session.cart.add(artwork);
//! assert_eq!(session.cart.count(), 2);
//! assert_eq!(session.cart.total(), 49.98);
//!
//! let purchase = session.checkout().expect("cart was not empty");
//! assert!(purchase.order_id.starts_with("PH-"));
//! assert!(session.cart.is_empty());
//!
//! // Every mutation produced one advisory notification.
//! assert!(!sink.notifications().is_empty());
//! ```

pub mod artwork;
pub mod cart;
pub mod error;
pub mod notify;
pub mod profile;
pub mod session;
pub mod settings;
pub mod storage;
pub mod store;
pub mod wishlist;

// Re-export main types at crate root
pub use artwork::Artwork;
pub use cart::{CartLine, CartStore, CART_KEY};
pub use error::{Error, Result};
pub use notify::{Notification, NotificationSink, NullSink, RecordingSink};
pub use profile::{
    generate_order_id, Purchase, User, UserPatch, UserStore, ORDER_ID_PREFIX, USER_KEY,
};
pub use session::Session;
pub use settings::{
    FontSize, Settings, SettingsPatch, SettingsStore, Theme, DEFAULT_BUTTON_COLOR, SETTINGS_KEY,
};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageExt};
pub use store::{CollectionStore, Keyed, LoadOutcome, SingletonStore};
pub use wishlist::{WishlistEntry, WishlistStore, WISHLIST_KEY};

/// Type aliases for clarity
pub type ArtworkId = String;
pub type Timestamp = chrono::DateTime<chrono::Utc>;
