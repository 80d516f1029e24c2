//! Employee Cache - a time-expiring cache fronting an employee record store
//!
//! Caches employee profiles with per-entry lifetimes, keeps inserts and
//! deletes consistent with the backing store, and reclaims expired entries
//! in the background.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod tasks;

pub use cache::CacheStore;
pub use config::Config;
pub use error::{CacheError, Result};
pub use records::{MemoryRecordStore, RecordStore};
