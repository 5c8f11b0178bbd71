//! Error types for the storage backends.
//!
//! Store mutations never surface errors to callers; only the storage layer
//! returns `Result`, and the stores absorb those failures internally.

use thiserror::Error;

/// All possible errors from the storage layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage io error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed for key '{key}': {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, Error>;
