//! Expiration Policy Module
//!
//! Decides when items expire, given the cache-wide lifetime defaults.

use std::time::Duration;

use tokio::time::Instant;

use crate::cache::Item;

// == Expiration Policy ==
/// Cache-wide lifetime rules shared by reads and reclamation sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    /// Lifetime used when a caller passes a zero duration and endless
    /// lifetime is disabled
    pub default_expiration: Duration,
    /// Whether a zero duration produces an endless item
    pub endless_lifetime: bool,
}

impl ExpirationPolicy {
    pub fn new(default_expiration: Duration, endless_lifetime: bool) -> Self {
        Self {
            default_expiration,
            endless_lifetime,
        }
    }

    /// Resolves the expiration instant for an item inserted at `now`.
    ///
    /// A zero `duration` means "no explicit lifetime": the item becomes
    /// endless when endless lifetime is enabled, otherwise it receives the
    /// default expiration. Returns None for endless items, including
    /// lifetimes that reach past the furthest representable instant.
    pub fn resolve(&self, duration: Duration, now: Instant) -> Option<Instant> {
        if duration.is_zero() && self.endless_lifetime {
            return None;
        }

        let effective = if duration.is_zero() {
            self.default_expiration
        } else {
            duration
        };
        now.checked_add(effective)
    }

    /// Returns true if `item` is expired at `now`.
    pub fn is_expired(&self, item: &Item, now: Instant) -> bool {
        item.is_expired_at(now)
    }
}
