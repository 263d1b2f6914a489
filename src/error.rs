//! Error types for the ordered collections in this crate.

use thiserror::Error;

/// Result type alias for fallible collection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An enum representing the ways an operation on an ordered collection can be rejected.
///
/// Every error is returned before the collection is modified, so a rejected call never leaves a
/// collection partially updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument was outside of the domain of the operation, such as a rank that is not less
    /// than the length of the collection.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The named operation requires at least one key, but the collection is empty.
    #[error("{0} called on an empty collection")]
    Underflow(&'static str),
}
