//! Recording record store for unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::EmployeeRecord;
use crate::records::{RecordStore, StoreError, BASE_SALARY};

/// Record store that logs every call and fails on demand.
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    inserted: Mutex<Vec<String>>,
    delete_calls: Mutex<Vec<Vec<String>>>,
    promoted: Mutex<Vec<String>>,
    fail_inserts: AtomicBool,
    fail_deletes: AtomicBool,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn inserted(&self) -> Vec<String> {
        self.inserted.lock().unwrap().clone()
    }

    pub(crate) fn delete_calls(&self) -> Vec<Vec<String>> {
        self.delete_calls.lock().unwrap().clone()
    }

    pub(crate) fn promoted(&self) -> Vec<String> {
        self.promoted.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn insert(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("insert rejected".to_string()));
        }
        self.inserted.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("delete rejected".to_string()));
        }
        self.delete_calls.lock().unwrap().push(keys.to_vec());
        Ok(())
    }

    async fn get_by_key(&self, key: &str) -> Result<EmployeeRecord, StoreError> {
        Ok(EmployeeRecord::new(key, BASE_SALARY))
    }

    async fn promote(&self, key: &str) -> Result<(), StoreError> {
        self.promoted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
