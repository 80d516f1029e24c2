//! Cache Item Module
//!
//! Defines a single cached value together with its lifecycle metadata.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::models::Payload;

// == Item ==
/// A cached value with its creation time and optional expiration.
#[derive(Debug, Clone)]
pub struct Item {
    /// The stored value
    pub value: Payload,
    /// Monotonic insertion time, used for expiration and tenure
    pub created: Instant,
    /// Wall-clock insertion time, for reporting
    pub created_at: DateTime<Utc>,
    /// Instant after which the item is invalid, None = endless lifetime
    pub expiration: Option<Instant>,
}

impl Item {
    // == Constructor ==
    /// Creates an item inserted at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Insertion instant
    /// * `expiration` - Expiration instant, or None for an endless item
    pub fn new(value: Payload, now: Instant, expiration: Option<Instant>) -> Self {
        Self {
            value,
            created: now,
            created_at: Utc::now(),
            expiration,
        }
    }

    /// Returns true if the item is exempt from time-based expiration.
    pub fn is_endless(&self) -> bool {
        self.expiration.is_none()
    }

    // == Is Expired ==
    /// Checks whether the item is expired at `now`.
    ///
    /// Boundary condition: an item is still valid at the exact expiration
    /// instant and expires strictly after it.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expiration {
            Some(expiration) => now > expiration,
            None => false,
        }
    }

    /// Returns how long the item has been cached at `now`.
    pub fn tenure_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created)
    }
}
