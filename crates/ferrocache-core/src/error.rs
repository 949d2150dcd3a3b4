//! Error types for the cache engine.
//!
//! The cache engine has exactly one fallible precondition (an invalid key);
//! everything else the engine does — including capacity overflow — is not
//! an error (see `Cache::put`).

use thiserror::Error;

/// Result type alias for cache engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cache engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key was empty, exceeded 250 bytes, or contained whitespace.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
