//! User account model.
//!
//! A [`User`] is an account that owns contacts. Password hashing itself lives
//! outside this crate; `password_hash` is an opaque string stored and returned
//! as given, never logged.

use serde::{Deserialize, Serialize};

use crate::domain::now_iso;

/// A user account record.
///
/// Stored in its own collection/file, separate from contacts. `username` is
/// unique; uniqueness is enforced by the service layer on registration, not
/// by the storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage identifier, empty until persisted.
    #[serde(default)]
    pub id: String,

    /// Unique login name.
    pub username: String,

    /// Opaque salted password hash. Never plaintext, never logged.
    pub password_hash: String,

    /// Optional contact email.
    #[serde(default)]
    pub email: Option<String>,

    /// RFC 3339 creation timestamp.
    #[serde(default = "now_iso")]
    pub created_at: String,
}

impl User {
    /// Creates a new, not-yet-persisted user.
    ///
    /// The id is left empty for the storage layer to assign.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            email: None,
            created_at: now_iso(),
        }
    }
}

/// A partial update to a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement username.
    pub username: Option<String>,

    /// Replacement password hash.
    pub password_hash: Option<String>,

    /// Replacement email.
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_no_id_and_a_timestamp() {
        let user = User::new("alice", "hash:abc");
        assert!(user.id.is_empty());
        assert!(!user.created_at.is_empty());
        assert_eq!(user.email, None);
    }

    #[test]
    fn user_round_trips_through_json() {
        let mut user = User::new("alice", "hash:abc");
        user.id = "u1".to_string();
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
