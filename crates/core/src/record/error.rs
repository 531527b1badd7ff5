//! Error types for torrent records.

use thiserror::Error;

/// Errors that can occur when working with torrent records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The stored digest no longer matches the record's fields.
    ///
    /// Always recoverable: the caller decides whether to discard, rehash or
    /// flag the record.
    #[error("Mutated record hash: computed {computed}, stored {stored}")]
    HashMismatch { computed: String, stored: String },

    /// An info hash could not be decoded.
    #[error("Invalid info hash: {0}")]
    InvalidInfoHash(String),
}

impl RecordError {
    /// Whether the record itself is still usable after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::HashMismatch { .. })
    }
}
