//! Error types for Beerburst

use thiserror::Error;

/// Main error type for Beerburst operations
#[derive(Error, Debug)]
pub enum BeerburstError {
    /// The description source could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The description source is not a JSON array of records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A description was given a second, different parent under
    /// [`ParentPolicy::Reject`](crate::ParentPolicy::Reject)
    #[error("Conflicting parent for '{name}': already '{existing}', got '{requested}'")]
    ConflictingParent {
        /// The description being re-parented
        name: String,
        /// Parent recorded first
        existing: String,
        /// Parent requested by a later record
        requested: String,
    },

    /// A view action named a description that is not in the taxonomy
    #[error("Unknown description: {0}")]
    UnknownDescription(String),
}

/// Result type alias for Beerburst operations
pub type Result<T> = std::result::Result<T, BeerburstError>;
