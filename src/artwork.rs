//! Artwork - the catalog item the storefront sells.
//!
//! The stores treat an artwork as an opaque value supplied by the caller:
//! it is copied into cart lines, wishlist entries and purchase snapshots,
//! and never mutated.

use crate::{ArtworkId, Timestamp};
use serde::{Deserialize, Serialize};

/// A piece of digital art listed on the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// Unique identifier for this artwork
    pub id: ArtworkId,
    /// Display title
    pub title: String,
    /// Artist display name
    pub artist: String,
    /// Price in whole currency units (decimal)
    pub price: f64,
    /// Long-form description
    pub description: String,
    /// URL or data URI of the primary image
    pub image_url: String,
    /// Canvas dimensions, e.g. "32x32px"
    pub dimensions: String,
    /// Category label
    pub category: String,
    /// Free-form tags
    pub tags: Vec<String>,
    /// When the artwork was listed
    pub created_at: Timestamp,
}

/// Build a throwaway artwork for tests.
#[cfg(test)]
pub(crate) fn sample(id: &str, price: f64) -> Artwork {
    Artwork {
        id: id.to_string(),
        title: format!("Artwork {id}"),
        artist: "Pixel Painter".to_string(),
        price,
        description: "A sample piece".to_string(),
        image_url: format!("https://example.com/{id}.png"),
        dimensions: "32x32px".to_string(),
        category: "pixel".to_string(),
        tags: vec!["retro".to_string(), "sprite".to_string()],
        created_at: chrono::Utc::now(),
    }
}
