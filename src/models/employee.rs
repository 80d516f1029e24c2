//! Employee records
//!
//! The salary and promotion facts owned by the record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employee record as held by the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub name: String,
    pub email: String,
    pub status: String,
    /// Monthly salary in whole currency units
    pub salary: i32,
    pub company_name: String,
    pub department_name: String,
    /// Time of the last promotion, if any
    #[serde(default)]
    pub promoted_at: Option<DateTime<Utc>>,
}

impl EmployeeRecord {
    /// Creates a record for a newly registered employee
    pub fn new(name: impl Into<String>, salary: i32) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            status: "active".to_string(),
            salary,
            company_name: String::new(),
            department_name: String::new(),
            promoted_at: None,
        }
    }
}
