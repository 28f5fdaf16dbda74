//! Contact management business logic.
//!
//! [`PersonService`] sits between callers and the storage facade. It owns
//! the rules the storage layer deliberately does not: input validation, the
//! ownership filter restricting each user to their own records, the legacy
//! (ownerless) visibility fallback, and the append-only note convention for
//! the details field.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::domain::{now_iso, Person, PersonPatch, Result};
use crate::services::validation;
use crate::storage::{Repository, Store};

/// Service for contact CRUD on behalf of a user.
///
/// Every method takes the acting user's id and applies the ownership
/// filter: a contact is visible when it belongs to that user or predates
/// ownership entirely (see [`crate::domain::LEGACY_OWNER`]). Cross-user
/// access is reported as absence, never as an error, so callers cannot
/// probe for other users' record ids.
pub struct PersonService {
    store: Store<Person>,
}

impl PersonService {
    /// Creates the service over an opened store.
    #[must_use]
    pub fn new(store: Store<Person>) -> Self {
        Self { store }
    }

    /// Returns all contacts visible to the user.
    ///
    /// That is the user's own records plus any legacy records without an
    /// owner. Ordering follows the backend and is not guaranteed stable.
    pub fn list(&self, user_id: &str) -> Result<Vec<Person>> {
        let mut people = self.store.find_all(None)?;
        people.retain(|p| p.visible_to(user_id));

        tracing::debug!(user_id = %user_id, count = people.len(), "listed contacts");
        Ok(people)
    }

    /// Looks up one contact, applying the ownership filter.
    ///
    /// Returns `Ok(None)` both for a missing id and for a record owned by
    /// someone else; the latter additionally logs a warning.
    pub fn get(&self, person_id: &str, user_id: &str) -> Result<Option<Person>> {
        let Some(person) = self.store.find_by_id(person_id)? else {
            return Ok(None);
        };

        if !person.visible_to(user_id) {
            tracing::warn!(
                user_id = %user_id,
                person_id = %person_id,
                "denied access to contact owned by another user"
            );
            return Ok(None);
        }

        Ok(Some(person))
    }

    /// Creates a new contact owned by the user.
    ///
    /// Name and details are validated and trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty, too-short or too-long name,
    /// or over-long details; otherwise any storage failure.
    pub fn create(&self, name: &str, details: &str, user_id: &str) -> Result<Person> {
        validation::person_name(name)?;
        validation::person_details(details)?;

        let person = self
            .store
            .create(Person::new(name.trim(), details.trim(), user_id))?;

        tracing::info!(person_id = %person.id, user_id = %user_id, "contact created");
        Ok(person)
    }

    /// Replaces the given fields of a contact.
    ///
    /// `None` fields are left unchanged. Returns `Ok(None)` if the contact
    /// is missing or not visible to the user.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a supplied field is invalid; otherwise
    /// any storage failure.
    pub fn update(
        &self,
        person_id: &str,
        name: Option<&str>,
        details: Option<&str>,
        user_id: &str,
    ) -> Result<Option<Person>> {
        if self.get(person_id, user_id)?.is_none() {
            tracing::debug!(person_id = %person_id, "update skipped, contact not visible");
            return Ok(None);
        }

        if let Some(name) = name {
            validation::person_name(name)?;
        }
        if let Some(details) = details {
            validation::person_details(details)?;
        }

        let patch = PersonPatch {
            name: name.map(|n| n.trim().to_string()),
            details: details.map(|d| d.trim().to_string()),
        };
        let updated = self.store.update(person_id, &patch)?;

        if updated.is_some() {
            tracing::info!(person_id = %person_id, "contact updated");
        }
        Ok(updated)
    }

    /// Appends a timestamped note segment to a contact's details.
    ///
    /// This is the non-destructive counterpart to [`update`](Self::update):
    /// existing details are kept and the note is added as a new
    /// `[timestamp] text` paragraph. Returns `Ok(None)` if the contact is
    /// missing or not visible to the user.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty note or if the accumulated
    /// details would exceed the size limit; otherwise any storage failure.
    pub fn append_note(
        &self,
        person_id: &str,
        note: &str,
        user_id: &str,
    ) -> Result<Option<Person>> {
        let note = note.trim();
        if note.is_empty() {
            return Err(crate::domain::PeopleError::Validation(
                "Note is required".to_string(),
            ));
        }

        let Some(person) = self.get(person_id, user_id)? else {
            return Ok(None);
        };

        let segment = format!("[{}] {note}", now_iso());
        let details = if person.details.is_empty() {
            segment
        } else {
            format!("{}\n\n{segment}", person.details)
        };
        validation::person_details(&details)?;

        let patch = PersonPatch {
            details: Some(details),
            ..PersonPatch::default()
        };
        let updated = self.store.update(person_id, &patch)?;

        if updated.is_some() {
            tracing::info!(person_id = %person_id, "note appended");
        }
        Ok(updated)
    }

    /// Deletes a contact if it is visible to the user.
    ///
    /// Returns `Ok(false)` for a missing id, a record owned by someone
    /// else, or a delete that raced with another writer.
    pub fn delete(&self, person_id: &str, user_id: &str) -> Result<bool> {
        if self.get(person_id, user_id)?.is_none() {
            tracing::debug!(person_id = %person_id, "delete skipped, contact not visible");
            return Ok(false);
        }

        let deleted = self.store.delete(person_id)?;
        if deleted {
            tracing::info!(person_id = %person_id, "contact deleted");
        }
        Ok(deleted)
    }

    /// Fuzzy-searches the user's visible contacts by name.
    ///
    /// Results are ranked best match first. An empty query matches nothing.
    pub fn search(&self, query: &str, user_id: &str) -> Result<Vec<Person>> {
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, Person)> = self
            .list(user_id)?
            .into_iter()
            .filter_map(|p| matcher.fuzzy_match(&p.name, query).map(|score| (score, p)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        tracing::debug!(query = %query, count = scored.len(), "search complete");
        Ok(scored.into_iter().map(|(_, p)| p).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PeopleError;
    use crate::storage::JsonRepository;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> PersonService {
        let store = JsonRepository::new(dir.path().join("data.json")).unwrap();
        PersonService::new(Store::Json(store))
    }

    #[test]
    fn create_trims_and_assigns_ownership() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let person = svc.create("  John Doe  ", " met at conf ", "u1").unwrap();
        assert_eq!(person.name, "John Doe");
        assert_eq!(person.details, "met at conf");
        assert_eq!(person.user_id, "u1");
    }

    #[test]
    fn create_rejects_invalid_names() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        assert!(matches!(
            svc.create("", "", "u1"),
            Err(PeopleError::Validation(_))
        ));
        assert!(matches!(
            svc.create("J", "", "u1"),
            Err(PeopleError::Validation(_))
        ));
    }

    #[test]
    fn list_is_scoped_to_the_user_plus_legacy() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        svc.create("John Doe", "", "u1").unwrap();
        svc.create("Jane Roe", "", "u2").unwrap();
        svc.create("Old Contact", "", crate::domain::LEGACY_OWNER)
            .unwrap();

        let mine = svc.list("u1").unwrap();
        let names: Vec<&str> = mine.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(mine.len(), 2);
        assert!(names.contains(&"John Doe"));
        assert!(names.contains(&"Old Contact"));
    }

    #[test]
    fn cross_user_access_is_absence_not_error() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let person = svc.create("John Doe", "", "u1").unwrap();
        assert!(svc.get(&person.id, "u2").unwrap().is_none());
        assert!(!svc.delete(&person.id, "u2").unwrap());
        assert!(svc
            .update(&person.id, Some("Hacked"), None, "u2")
            .unwrap()
            .is_none());

        // Still intact for the owner.
        let found = svc.get(&person.id, "u1").unwrap().unwrap();
        assert_eq!(found.name, "John Doe");
    }

    #[test]
    fn update_patches_only_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let person = svc.create("John Doe", "old", "u1").unwrap();
        let updated = svc
            .update(&person.id, None, Some("met at conf"), "u1")
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "John Doe");
        assert_eq!(updated.details, "met at conf");
        assert_eq!(updated.created_at, person.created_at);
    }

    #[test]
    fn append_note_accumulates_timestamped_segments() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let person = svc.create("John Doe", "", "u1").unwrap();
        let after_first = svc
            .append_note(&person.id, "met at conf", "u1")
            .unwrap()
            .unwrap();
        assert!(after_first.details.starts_with('['));
        assert!(after_first.details.ends_with("met at conf"));

        let after_second = svc
            .append_note(&person.id, "sent follow-up", "u1")
            .unwrap()
            .unwrap();
        assert!(after_second.details.contains("met at conf"));
        assert!(after_second.details.contains("sent follow-up"));
        assert!(after_second.details.contains("\n\n"));
    }

    #[test]
    fn append_note_rejects_empty_notes() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let person = svc.create("John Doe", "", "u1").unwrap();
        assert!(matches!(
            svc.append_note(&person.id, "   ", "u1"),
            Err(PeopleError::Validation(_))
        ));
    }

    #[test]
    fn delete_then_get_is_absent() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let person = svc.create("John Doe", "", "u1").unwrap();
        assert!(svc.delete(&person.id, "u1").unwrap());
        assert!(svc.get(&person.id, "u1").unwrap().is_none());
        assert!(!svc.delete(&person.id, "u1").unwrap());
    }

    #[test]
    fn search_ranks_and_scopes_matches() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        svc.create("John Doe", "", "u1").unwrap();
        svc.create("Johanna Doern", "", "u1").unwrap();
        svc.create("John Doe", "", "u2").unwrap();

        let results = svc.search("john doe", "u1").unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.user_id == "u1"));
        assert_eq!(results[0].name, "John Doe");

        assert!(svc.search("zzzz", "u1").unwrap().is_empty());
    }
}
