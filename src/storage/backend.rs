//! Storage backend abstraction.
//!
//! This module defines the [`Repository`] trait that abstracts over the two
//! persistence backends (MongoDB and local JSON file), plus the [`Record`]
//! trait the backends are generic over. Callers perform CRUD through
//! [`Repository`] without knowing which backend is active.
//!
//! # Design Philosophy
//!
//! The trait is minimal and mirrors the operations the service layer actually
//! needs, not a generic ORM. Absence is a normal value, never an error:
//! looking up a missing id yields `Ok(None)` and deleting one yields
//! `Ok(false)`. Filters are flat equality maps; there is no query language.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Person, PersonPatch, Result, User, UserPatch};

/// An equality filter over record fields, e.g. `{"user_id": "u1"}`.
///
/// A record matches when every entry equals the record's string field of the
/// same name. An empty filter matches everything.
pub type Filter = BTreeMap<String, String>;

/// Generates a fresh unique record id.
///
/// Ids are UUID v4 strings, assigned by the backends when a record arrives
/// with an empty id.
#[must_use]
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A persistable record type.
///
/// Implemented for [`Person`] and [`User`]. The associated `Patch` type
/// carries a partial update; applying it must refresh the record's
/// `updated_at` where the record has one, and must never change the id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send {
    /// The partial-update type for this record.
    type Patch;

    /// The storage identifier, empty for not-yet-persisted records.
    fn id(&self) -> &str;

    /// Sets the storage identifier.
    fn assign_id(&mut self, id: String);

    /// Applies a partial update in place.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Returns `true` if this record satisfies the equality filter.
    ///
    /// The default implementation serializes the record and compares the
    /// filter entries against its string fields.
    fn matches(&self, filter: &Filter) -> bool {
        matches_filter(self, filter)
    }
}

/// Compares a serialized record against an equality filter.
///
/// Only string fields can match; a filter key naming a missing or non-string
/// field never matches.
fn matches_filter<R: Serialize>(record: &R, filter: &Filter) -> bool {
    let Ok(value) = serde_json::to_value(record) else {
        return false;
    };
    filter.iter().all(|(key, expected)| {
        value.get(key).and_then(serde_json::Value::as_str) == Some(expected.as_str())
    })
}

impl Record for Person {
    type Patch = PersonPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: &PersonPatch) {
        self.apply(patch);
    }
}

impl Record for User {
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(username) = &patch.username {
            self.username.clone_from(username);
        }
        if let Some(password_hash) = &patch.password_hash {
            self.password_hash.clone_from(password_hash);
        }
        if let Some(email) = &patch.email {
            self.email = Some(email.clone());
        }
    }
}

/// Abstraction over the persistence backends.
///
/// Every operation is a single synchronous call against one logical record
/// (or, for [`find_all`], one scan). There are no transactions, no
/// optimistic-concurrency tokens and no pagination.
///
/// # Implementations
///
/// - [`MongoRepository`](crate::storage::MongoRepository): one collection per
///   record type, one network round trip per call
/// - [`JsonRepository`](crate::storage::JsonRepository): whole-file
///   read/modify/write per call
///
/// # Errors
///
/// Methods fail only when the backend itself is unavailable (connection or
/// file I/O failure). "Not found" is expressed in the return value.
///
/// [`find_all`]: Repository::find_all
pub trait Repository<R: Record> {
    /// Returns all records matching the optional equality filter.
    ///
    /// Ordering is unspecified and not guaranteed stable across backends.
    fn find_all(&self, filter: Option<&Filter>) -> Result<Vec<R>>;

    /// Looks up a single record by id. `Ok(None)` if absent.
    fn find_by_id(&self, id: &str) -> Result<Option<R>>;

    /// Persists a new record, assigning an id if the caller left it empty.
    ///
    /// Returns the record as stored, with id populated.
    fn create(&self, record: R) -> Result<R>;

    /// Applies a partial update to the record with the given id.
    ///
    /// Returns the updated record, or `Ok(None)` if no record has that id.
    fn update(&self, id: &str, patch: &R::Patch) -> Result<Option<R>>;

    /// Deletes the record with the given id.
    ///
    /// Returns `Ok(false)` if no record had that id; this is not an error.
    fn delete(&self, id: &str) -> Result<bool>;

    /// Returns `true` if any record matches the filter.
    fn exists(&self, filter: &Filter) -> Result<bool> {
        Ok(!self.find_all(Some(filter))?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_on_equal_string_field() {
        let person = Person::new("John Doe", "", "u1");
        let filter = Filter::from([("user_id".to_string(), "u1".to_string())]);
        assert!(person.matches(&filter));
    }

    #[test]
    fn filter_rejects_on_unequal_field() {
        let person = Person::new("John Doe", "", "u1");
        let filter = Filter::from([("user_id".to_string(), "u2".to_string())]);
        assert!(!person.matches(&filter));
    }

    #[test]
    fn filter_with_unknown_key_never_matches() {
        let person = Person::new("John Doe", "", "u1");
        let filter = Filter::from([("no_such_field".to_string(), "x".to_string())]);
        assert!(!person.matches(&filter));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let person = Person::new("John Doe", "", "u1");
        assert!(person.matches(&Filter::new()));
    }

    #[test]
    fn multi_key_filter_requires_all_entries() {
        let person = Person::new("John Doe", "", "u1");
        let filter = Filter::from([
            ("user_id".to_string(), "u1".to_string()),
            ("name".to_string(), "John Doe".to_string()),
        ]);
        assert!(person.matches(&filter));

        let filter = Filter::from([
            ("user_id".to_string(), "u1".to_string()),
            ("name".to_string(), "Jane Doe".to_string()),
        ]);
        assert!(!person.matches(&filter));
    }

    #[test]
    fn user_patch_applies_partial_fields() {
        let mut user = User::new("alice", "hash:a");
        user.apply_patch(&UserPatch {
            password_hash: Some("hash:b".to_string()),
            ..UserPatch::default()
        });
        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "hash:b");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
