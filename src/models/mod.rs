//! Domain models for the employee cache
//!
//! Defines the payloads stored in the cache and the employee records
//! returned by the record store.

pub mod employee;
pub mod payload;
pub mod user;

// Re-export commonly used types
pub use employee::EmployeeRecord;
pub use payload::Payload;
pub use user::{User, UserPatch};
