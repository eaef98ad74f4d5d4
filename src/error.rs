//! Error types for fabmatrix
//!
//! Every failure here is deterministic and input-driven, so nothing is retried.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for fabmatrix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for parameter matrix construction
#[derive(Debug, Error)]
pub enum Error {
    /// Range descriptor could not be parsed or is out of bounds
    #[error("Malformed range spec {descriptor:?}: {reason}")]
    MalformedRangeSpec {
        /// The descriptor as supplied
        descriptor: String,
        /// What was wrong with it
        reason: String,
    },

    /// Operation token outside the known set
    #[error("Unsupported operation kind: {0:?}")]
    UnsupportedOperationKind(String),

    /// Memory location token outside the known set
    #[error("Unknown memory location: {0:?}")]
    UnknownMemoryLocation(String),

    /// Pair name not of the form `<source>_to_<destination>`
    #[error("Malformed memory type pair: {0:?}")]
    MalformedMemoryTypePair(String),

    /// Capability marker outside the known set
    #[error("Unknown capability: {0:?}")]
    UnknownCapability(String),

    /// An environment override could not be applied
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading collected test names failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn malformed_range(descriptor: &str, reason: impl Into<String>) -> Self {
        Error::MalformedRangeSpec {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }
}
