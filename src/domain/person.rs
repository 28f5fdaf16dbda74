//! Person domain model.
//!
//! A [`Person`] is a single contact: a name, a free-text details blob, and the
//! id of the user who owns it. The details field accumulates timestamped note
//! segments over time rather than being a single authored document.
//!
//! Ownership is advisory at this layer. The storage backends store `user_id`
//! as an ordinary field; the service layer is responsible for refusing
//! cross-user access. Records written before ownership existed carry no
//! `user_id` at all and deserialize with the [`LEGACY_OWNER`] sentinel, which
//! the service layer treats as visible to every user.

use serde::{Deserialize, Serialize};

use crate::domain::now_iso;

/// Sentinel owner assigned to records that predate per-user ownership.
///
/// Records carrying this owner are globally visible: they belong to no one
/// and every user's listing includes them. This mirrors the behavior of the
/// data files written by earlier versions and must not be tightened without
/// a migration.
pub const LEGACY_OWNER: &str = "legacy";

fn legacy_owner() -> String {
    LEGACY_OWNER.to_string()
}

/// A single contact record.
///
/// All fields are strings; `created_at` and `updated_at` are RFC 3339
/// timestamps. The `id` is assigned by the storage layer on creation and is
/// empty on a not-yet-persisted record.
///
/// Serialization writes snake_case keys (`created_at`, `updated_at`) but
/// accepts the camelCase keys (`createdAt`, `updatedAt`) found in data files
/// written by earlier versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Storage identifier, empty until persisted.
    #[serde(default)]
    pub id: String,

    /// Display name, trimmed and non-empty.
    pub name: String,

    /// Free-text notes. May be empty. Grows by appended timestamped segments.
    #[serde(default)]
    pub details: String,

    /// Id of the owning user. Defaults to [`LEGACY_OWNER`] for old records.
    #[serde(default = "legacy_owner")]
    pub user_id: String,

    /// RFC 3339 creation timestamp.
    #[serde(default = "now_iso", alias = "createdAt")]
    pub created_at: String,

    /// RFC 3339 timestamp of the most recent write.
    #[serde(default = "now_iso", alias = "updatedAt")]
    pub updated_at: String,
}

impl Person {
    /// Creates a new, not-yet-persisted person owned by `user_id`.
    ///
    /// The id is left empty for the storage layer to assign. Both timestamps
    /// are set to the same instant, so a freshly created record satisfies
    /// `created_at == updated_at`.
    pub fn new(
        name: impl Into<String>,
        details: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let now = now_iso();
        Self {
            id: String::new(),
            name: name.into(),
            details: details.into(),
            user_id: user_id.into(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Returns `true` if this record predates per-user ownership.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        self.user_id == LEGACY_OWNER
    }

    /// Returns `true` if the given user may see this record.
    ///
    /// Legacy records are visible to everyone; all others only to their owner.
    #[must_use]
    pub fn visible_to(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.is_legacy()
    }

    /// Applies a partial update, refreshing `updated_at`.
    ///
    /// Only the fields present in the patch change; `id`, `user_id` and
    /// `created_at` are never touched.
    pub fn apply(&mut self, patch: &PersonPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(details) = &patch.details {
            self.details.clone_from(details);
        }
        self.updated_at = now_iso();
    }
}

/// A partial update to a [`Person`].
///
/// `None` fields are left unchanged by [`Person::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    /// Replacement name, already trimmed by the caller.
    pub name: Option<String>,

    /// Replacement details text.
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_person_has_equal_timestamps_and_no_id() {
        let person = Person::new("John Doe", "", "u1");
        assert!(person.id.is_empty());
        assert_eq!(person.created_at, person.updated_at);
        assert_eq!(person.user_id, "u1");
        assert!(!person.is_legacy());
    }

    #[test]
    fn apply_changes_only_patched_fields() {
        let mut person = Person::new("John Doe", "old notes", "u1");
        let created = person.created_at.clone();
        std::thread::sleep(std::time::Duration::from_millis(5));

        person.apply(&PersonPatch {
            details: Some("met at conf".to_string()),
            ..PersonPatch::default()
        });

        assert_eq!(person.name, "John Doe");
        assert_eq!(person.details, "met at conf");
        assert_eq!(person.created_at, created);
        assert!(person.updated_at > created);
    }

    #[test]
    fn record_without_user_id_deserializes_as_legacy() {
        let json = r#"{"id": "p1", "name": "Old Contact", "details": ""}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert!(person.is_legacy());
        assert!(person.visible_to("anyone"));
    }

    #[test]
    fn camel_case_timestamps_are_accepted() {
        let json = r#"{
            "id": "p1",
            "name": "Old Contact",
            "user_id": "u1",
            "createdAt": "2020-01-01T00:00:00Z",
            "updatedAt": "2020-06-01T00:00:00Z"
        }"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.created_at, "2020-01-01T00:00:00Z");
        assert_eq!(person.updated_at, "2020-06-01T00:00:00Z");
    }

    #[test]
    fn serialization_writes_snake_case_keys() {
        let person = Person::new("John Doe", "", "u1");
        let value = serde_json::to_value(&person).unwrap();
        assert!(value.get("created_at").is_some());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn owned_record_is_not_visible_to_other_users() {
        let person = Person::new("John Doe", "", "u1");
        assert!(person.visible_to("u1"));
        assert!(!person.visible_to("u2"));
    }
}
