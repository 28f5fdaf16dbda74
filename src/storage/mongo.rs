//! MongoDB storage backend.
//!
//! One collection per record type. Each facade call translates into native
//! single-document operations (`find`, `find_one`, `insert_one`,
//! `replace_one`, `delete_one`) scoped by equality filters on the
//! application-level `id` field. No batching, no pagination; read and write
//! concerns are whatever the driver session defaults to.
//!
//! Records are stored as plain documents carrying their own string `id`
//! field. MongoDB's `_id` ObjectId exists on every document but is ignored
//! by this backend.
//!
//! The blocking (`sync`) driver API is used throughout: every storage call
//! in this crate is a single synchronous request with nothing suspending.

use std::marker::PhantomData;

use mongodb::bson::{self, doc, Bson, Document};
use mongodb::sync::{Collection, Database};

use crate::domain::error::{PeopleError, Result};
use crate::storage::backend::{generate_id, Filter, Record, Repository};

/// MongoDB backend for one record type.
///
/// Holds a handle to a single named collection. The handle is cheap to
/// clone and shares the driver's process-wide connection pool; pooling and
/// timeouts are the driver's concern, not this layer's.
pub struct MongoRepository<R> {
    collection: Collection<Document>,

    _record: PhantomData<R>,
}

impl<R: Record> MongoRepository<R> {
    /// Creates a backend over the named collection in the given database.
    ///
    /// No network call happens here; the driver connects lazily on first use.
    #[must_use]
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
            _record: PhantomData,
        }
    }

    fn to_document(record: &R) -> Result<Document> {
        bson::to_document(record)
            .map_err(|e| PeopleError::Storage(format!("failed to encode record: {e}")))
    }

    fn from_document(mut document: Document) -> Result<R> {
        document.remove("_id");
        bson::from_document(document)
            .map_err(|e| PeopleError::Storage(format!("failed to decode record: {e}")))
    }

    /// Translates an equality filter into a MongoDB query document.
    fn query(filter: Option<&Filter>) -> Document {
        let mut query = Document::new();
        if let Some(filter) = filter {
            for (key, value) in filter {
                query.insert(key.clone(), Bson::String(value.clone()));
            }
        }
        query
    }
}

impl<R: Record> Repository<R> for MongoRepository<R> {
    fn find_all(&self, filter: Option<&Filter>) -> Result<Vec<R>> {
        let _span = tracing::debug_span!("mongo_find_all").entered();

        let cursor = self.collection.find(Self::query(filter), None)?;
        let mut records = Vec::new();
        for document in cursor {
            records.push(Self::from_document(document?)?);
        }

        tracing::debug!(count = records.len(), "retrieved records");
        Ok(records)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<R>> {
        let _span = tracing::debug_span!("mongo_find_by_id", id = %id).entered();

        let record = self
            .collection
            .find_one(doc! { "id": id }, None)?
            .map(Self::from_document)
            .transpose()?;

        tracing::debug!(found = record.is_some(), "record lookup complete");
        Ok(record)
    }

    fn create(&self, mut record: R) -> Result<R> {
        let _span = tracing::debug_span!("mongo_create").entered();

        if record.id().is_empty() {
            record.assign_id(generate_id());
        }

        self.collection.insert_one(Self::to_document(&record)?, None)?;

        tracing::debug!(id = %record.id(), "record created");
        Ok(record)
    }

    fn update(&self, id: &str, patch: &R::Patch) -> Result<Option<R>> {
        let _span = tracing::debug_span!("mongo_update", id = %id).entered();

        let Some(document) = self.collection.find_one(doc! { "id": id }, None)? else {
            tracing::debug!("record not found, nothing updated");
            return Ok(None);
        };

        let mut record = Self::from_document(document)?;
        record.apply_patch(patch);
        self.collection
            .replace_one(doc! { "id": id }, Self::to_document(&record)?, None)?;

        tracing::debug!("record updated");
        Ok(Some(record))
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("mongo_delete", id = %id).entered();

        let deleted = self.collection.delete_one(doc! { "id": id }, None)?.deleted_count > 0;

        tracing::debug!(deleted, "delete complete");
        Ok(deleted)
    }

    fn exists(&self, filter: &Filter) -> Result<bool> {
        let _span = tracing::debug_span!("mongo_exists").entered();

        Ok(self
            .collection
            .find_one(Self::query(Some(filter)), None)?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Person;

    #[test]
    fn query_translates_filter_entries_to_string_fields() {
        let filter = Filter::from([("user_id".to_string(), "u1".to_string())]);
        let query = MongoRepository::<Person>::query(Some(&filter));
        assert_eq!(query.get_str("user_id").unwrap(), "u1");
    }

    #[test]
    fn empty_filter_is_an_empty_query() {
        assert!(MongoRepository::<Person>::query(None).is_empty());
    }

    #[test]
    fn records_survive_document_round_trip() {
        let mut person = Person::new("John Doe", "met at conf", "u1");
        person.id = "p1".to_string();

        let document = MongoRepository::<Person>::to_document(&person).unwrap();
        let decoded = MongoRepository::<Person>::from_document(document).unwrap();
        assert_eq!(decoded, person);
    }
}
