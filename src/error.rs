//! Error types for the employee cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

use crate::records::StoreError;

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key is present but its lifetime has elapsed
    #[error("Key expired: {0}")]
    Expired(String),

    /// Set on a key that is already cached
    #[error("Key already exists: {0}")]
    DuplicateKey(String),

    /// Update against a payload that is not a user record
    #[error("Stored value for {0} is not a user record")]
    TypeMismatch(String),

    /// Promotion requested before the tenure interval has elapsed
    #[error("Promotion for {key} requested too soon, {remaining:?} remaining")]
    TooSoon { key: String, remaining: Duration },

    /// Failure reported by the record store
    #[error("Record store error: {0}")]
    Adapter(#[from] StoreError),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
