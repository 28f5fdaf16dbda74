//! Storage layer: one CRUD interface over two interchangeable backends.
//!
//! Callers go through [`Store`], the facade over the MongoDB and JSON-file
//! backends. The backend is selected exactly once, at [`open`] time, from
//! the presence of a MongoDB connection string in the configuration, and is
//! held as an immutable tagged handle from then on. No call site branches on
//! configuration afterwards.
//!
//! # Modules
//!
//! - `backend`: the [`Repository`] and [`Record`] trait abstractions
//! - `json`: whole-file JSON array backend for local use
//! - `mongo`: single-document MongoDB backend
//!
//! # Guarantees (and non-guarantees)
//!
//! Each call is an independent, stateless, synchronous operation. There are
//! no transactions, no cross-record consistency, and no retry on failure;
//! durability is whatever the active backend itself provides.

pub mod backend;
pub mod json;
pub mod mongo;

pub use backend::{generate_id, Filter, Record, Repository};
pub use json::JsonRepository;
pub use mongo::MongoRepository;

use std::fmt;

use mongodb::sync::Client;

use crate::domain::{Person, Result, User};
use crate::Config;

/// Which backend a [`Store`] dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// MongoDB, selected when a connection string is configured.
    Mongo,
    /// Local JSON file, the fallback.
    Json,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mongo => write!(f, "mongodb"),
            Self::Json => write!(f, "json-file"),
        }
    }
}

/// The storage facade: a resolved backend for one record type.
///
/// Constructed once by [`open`] and passed around as an immutable handle.
/// All CRUD goes through the [`Repository`] impl, which dispatches to the
/// active variant.
pub enum Store<R: Record> {
    /// MongoDB-backed collection.
    Mongo(MongoRepository<R>),
    /// JSON-file-backed collection.
    Json(JsonRepository<R>),
}

impl<R: Record> Store<R> {
    /// Reports which backend this store dispatches to.
    #[must_use]
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Mongo(_) => BackendKind::Mongo,
            Self::Json(_) => BackendKind::Json,
        }
    }
}

impl<R: Record> Repository<R> for Store<R> {
    fn find_all(&self, filter: Option<&Filter>) -> Result<Vec<R>> {
        match self {
            Self::Mongo(repo) => repo.find_all(filter),
            Self::Json(repo) => repo.find_all(filter),
        }
    }

    fn find_by_id(&self, id: &str) -> Result<Option<R>> {
        match self {
            Self::Mongo(repo) => repo.find_by_id(id),
            Self::Json(repo) => repo.find_by_id(id),
        }
    }

    fn create(&self, record: R) -> Result<R> {
        match self {
            Self::Mongo(repo) => repo.create(record),
            Self::Json(repo) => repo.create(record),
        }
    }

    fn update(&self, id: &str, patch: &R::Patch) -> Result<Option<R>> {
        match self {
            Self::Mongo(repo) => repo.update(id, patch),
            Self::Json(repo) => repo.update(id, patch),
        }
    }

    fn delete(&self, id: &str) -> Result<bool> {
        match self {
            Self::Mongo(repo) => repo.delete(id),
            Self::Json(repo) => repo.delete(id),
        }
    }

    fn exists(&self, filter: &Filter) -> Result<bool> {
        match self {
            Self::Mongo(repo) => repo.exists(filter),
            Self::Json(repo) => repo.exists(filter),
        }
    }
}

/// The full set of opened stores, one per record type.
pub struct Stores {
    /// Contact records.
    pub people: Store<Person>,
    /// User accounts.
    pub users: Store<User>,
}

/// Opens the storage backends selected by the configuration.
///
/// When `config.mongo_uri` is set, both stores share one MongoDB client and
/// database, with collection names from the configuration. Otherwise each
/// record type gets its own JSON file. This decision is made here, once; the
/// returned handles never re-evaluate it.
///
/// # Errors
///
/// Returns an error if the MongoDB connection string cannot be parsed or the
/// JSON files cannot be created.
pub fn open(config: &Config) -> Result<Stores> {
    match &config.mongo_uri {
        Some(uri) => {
            tracing::info!(db = %config.db_name, "opening MongoDB storage");
            let client = Client::with_uri_str(uri)?;
            let database = client.database(&config.db_name);
            Ok(Stores {
                people: Store::Mongo(MongoRepository::new(&database, &config.people_collection)),
                users: Store::Mongo(MongoRepository::new(&database, &config.users_collection)),
            })
        }
        None => {
            tracing::info!(
                data_file = ?config.data_file,
                users_file = ?config.users_file,
                "opening JSON file storage"
            );
            Ok(Stores {
                people: Store::Json(JsonRepository::new(config.data_file.clone())?),
                users: Store::Json(JsonRepository::new(config.users_file.clone())?),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn json_config(dir: &TempDir) -> Config {
        Config {
            mongo_uri: None,
            data_file: dir.path().join("data.json"),
            users_file: dir.path().join("users.json"),
            ..Config::default()
        }
    }

    #[test]
    fn open_without_mongo_uri_selects_json_backend() {
        let dir = TempDir::new().unwrap();
        let stores = open(&json_config(&dir)).unwrap();
        assert_eq!(stores.people.kind(), BackendKind::Json);
        assert_eq!(stores.users.kind(), BackendKind::Json);
    }

    #[test]
    fn facade_dispatches_crud_to_active_backend() {
        let dir = TempDir::new().unwrap();
        let stores = open(&json_config(&dir)).unwrap();

        let created = stores
            .people
            .create(Person::new("John Doe", "", "u1"))
            .unwrap();
        assert!(stores.people.find_by_id(&created.id).unwrap().is_some());
        assert!(stores.people.delete(&created.id).unwrap());
        assert!(stores.people.find_by_id(&created.id).unwrap().is_none());
    }

    #[test]
    fn backend_kind_display_names() {
        assert_eq!(BackendKind::Json.to_string(), "json-file");
        assert_eq!(BackendKind::Mongo.to_string(), "mongodb");
    }
}
