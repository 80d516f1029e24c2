//! User payload
//!
//! The employee profile cached under its name, plus the field patch
//! applied by updates.

use serde::{Deserialize, Serialize};

/// Employee profile stored in the cache.
///
/// # Fields
/// - `name`: Unique employee name, used as the cache key
/// - `age`: Age in years
/// - `sex`: Free-form sex/gender field
/// - `email`: Contact address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique employee name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Sex/gender as supplied by the caller
    pub sex: String,
    /// Contact address
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Creates a new User
    pub fn new(name: impl Into<String>, age: u32, sex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            sex: sex.into(),
            email: String::new(),
        }
    }

    /// Sets the contact address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Applies every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(sex) = &patch.sex {
            self.sex.clone_from(sex);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
    }
}

/// Field-level changes for a cached [`User`].
///
/// The name is the cache key and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserPatch {
    /// Creates an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.sex.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_without_email() {
        let json = r#"{"name": "alice", "age": 31, "sex": "female"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.age, 31);
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_apply_patch_sets_only_present_fields() {
        let mut user = User::new("bob", 40, "male").with_email("bob@corp.test");
        user.apply(&UserPatch::new().age(41));

        assert_eq!(user.age, 41);
        assert_eq!(user.sex, "male");
        assert_eq!(user.email, "bob@corp.test");
    }

    #[test]
    fn test_apply_full_patch() {
        let mut user = User::new("carol", 25, "female");
        user.apply(&UserPatch::new().age(26).sex("other").email("c@corp.test"));

        assert_eq!(user, User::new("carol", 26, "other").with_email("c@corp.test"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(UserPatch::new().is_empty());
        assert!(!UserPatch::new().sex("x").is_empty());

        let patch: UserPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }
}
