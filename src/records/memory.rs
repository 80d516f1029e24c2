//! In-memory record store
//!
//! A volatile [`RecordStore`] used by the server binary and in tests.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::EmployeeRecord;
use crate::records::{RecordStore, StoreError};

/// Salary assigned to newly inserted employees
pub const BASE_SALARY: i32 = 1000;

/// Percentage raise applied on promotion
const PROMOTION_RAISE_PERCENT: i32 = 10;

// == Memory Record Store ==
/// Employee records kept in a HashMap.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, EmployeeRecord>>,
}

impl MemoryRecordStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Returns true if a record exists for the key
    pub async fn contains(&self, key: &str) -> bool {
        self.records.read().await.contains_key(key)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, key: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(key) {
            return Err(StoreError::Duplicate(key.to_string()));
        }
        records.insert(key.to_string(), EmployeeRecord::new(key, BASE_SALARY));
        debug!(key, "record inserted");
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        for key in keys {
            records.remove(key);
        }
        debug!(count = keys.len(), "records deleted");
        Ok(())
    }

    async fn get_by_key(&self, key: &str) -> Result<EmployeeRecord, StoreError> {
        self.records
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn promote(&self, key: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        record.salary = record
            .salary
            .checked_mul(PROMOTION_RAISE_PERCENT)
            .map(|raise| raise / 100)
            .and_then(|raise| record.salary.checked_add(raise))
            .ok_or_else(|| anyhow!("salary overflow promoting {}", key))?;
        record.status = "promoted".to_string();
        record.promoted_at = Some(Utc::now());
        debug!(key, salary = record.salary, "promotion committed");
        Ok(())
    }
}
