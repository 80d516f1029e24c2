//! Record Store Module
//!
//! The persistence boundary the cache keeps consistent with. The backing
//! store is authoritative for employee existence, salary and promotions.

mod memory;
#[cfg(test)]
pub(crate) mod testing;

pub use memory::{MemoryRecordStore, BASE_SALARY};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::EmployeeRecord;

// == Store Error ==
/// Failure reported by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record exists for the key
    #[error("record not found: {0}")]
    NotFound(String),

    /// A record already exists for the key
    #[error("record already exists: {0}")]
    Duplicate(String),

    /// The store could not be reached
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// == Record Store ==
/// Contract the cache needs from the backing employee database.
///
/// Implementations synchronize themselves; the cache may call them
/// concurrently from any task.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Registers a new employee
    async fn insert(&self, key: &str) -> Result<(), StoreError>;

    /// Removes every listed employee
    async fn delete(&self, keys: &[String]) -> Result<(), StoreError>;

    /// Looks up the salary record for an employee
    async fn get_by_key(&self, key: &str) -> Result<EmployeeRecord, StoreError>;

    /// Commits a promotion for an employee
    async fn promote(&self, key: &str) -> Result<(), StoreError>;
}
