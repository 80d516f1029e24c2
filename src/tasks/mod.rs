//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reclamation: removes expired entries from the cache and the record store

mod reclaim;

pub use reclaim::ReclamationHandle;
pub(crate) use reclaim::spawn_reclamation_task;
