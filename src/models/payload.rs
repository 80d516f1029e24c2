//! Cached payloads
//!
//! The value half of a cache entry.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Value stored in a cache entry.
///
/// Payloads arrive already decoded; the cache never inspects `Raw`
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// An employee profile
    User(User),
    /// An opaque document
    Raw(serde_json::Value),
}

impl Payload {
    /// Returns the user record, if this payload holds one
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Payload::User(user) => Some(user),
            Payload::Raw(_) => None,
        }
    }

    pub fn as_user_mut(&mut self) -> Option<&mut User> {
        match self {
            Payload::User(user) => Some(user),
            Payload::Raw(_) => None,
        }
    }
}

impl From<User> for Payload {
    fn from(user: User) -> Self {
        Payload::User(user)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Raw(value)
    }
}
