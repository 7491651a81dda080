//! Error types for dialdb

use std::fmt;

/// Result type alias for dialdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a contact table.
///
/// Table operations themselves never fail; duplicate and missing keys are
/// reported through the outcome enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bucket count of zero
    ZeroBuckets,

    /// Tracker capacity of zero
    ZeroCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroBuckets => write!(f, "Bucket count must be greater than 0"),
            Error::ZeroCapacity => write!(f, "History capacity must be greater than 0"),
        }
    }
}

impl std::error::Error for Error {}
