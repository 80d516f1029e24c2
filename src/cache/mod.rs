//! Cache Module
//!
//! Provides the in-memory employee cache with time-based expiration,
//! background reclamation and promotion gating.

mod item;
mod policy;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use item::Item;
pub use policy::ExpirationPolicy;
pub use stats::CacheStats;
pub use store::{CacheStore, SweepReport};

pub(crate) use store::CacheInner;
