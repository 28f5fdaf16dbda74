//! JSON file-based storage backend.
//!
//! Stores a collection as a single file containing a JSON array of flat
//! objects, one file per record type. Every call is a stateless function of
//! the current file contents: reads load and decode the whole file, writes
//! re-encode and overwrite the whole file. Nothing is cached between calls.
//!
//! # Concurrency
//!
//! There is no locking and no write-to-temp-plus-rename step. Two processes
//! writing the same file can interleave and silently lose one writer's
//! update, and a write interrupted mid-way can leave a truncated file. This
//! is a known, accepted limitation: the backend targets single-process,
//! low-concurrency local use. Adding locking here would change observable
//! behavior under concurrent load and is deliberately not done.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n) - decodes the entire file on every call
//! - **Write**: O(n) - re-encodes and rewrites the entire file
//! - **Best for**: small personal datasets, infrequent writes

use std::marker::PhantomData;
use std::path::PathBuf;

use crate::domain::error::{PeopleError, Result};
use crate::storage::backend::{generate_id, Filter, Record, Repository};

/// JSON file storage backend for one record type.
///
/// The file holds a JSON array of records, pretty-printed for hand editing.
/// A missing file reads as an empty collection. Construction seeds an empty
/// `[]` file so the storage location is visible immediately.
///
/// # File Format
///
/// ```json
/// [
///   {
///     "id": "4be0643f-1d98-4f92-9d2c-6f09f2aa4c59",
///     "name": "John Doe",
///     "details": "",
///     "user_id": "u1",
///     "created_at": "2026-08-25T09:00:00.000000Z",
///     "updated_at": "2026-08-25T09:00:00.000000Z"
///   }
/// ]
/// ```
pub struct JsonRepository<R> {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    _record: PhantomData<R>,
}

impl<R: Record> JsonRepository<R> {
    /// Creates or opens a JSON file backend at the given path.
    ///
    /// Parent directories are created automatically. If the file does not
    /// exist it is seeded with an empty array.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or the initial write fails.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if !file_path.exists() {
            tracing::debug!("seeding empty collection file");
            std::fs::write(&file_path, "[]")?;
        }

        Ok(Self {
            file_path,
            _record: PhantomData,
        })
    }

    /// Reads and decodes the whole collection from disk.
    ///
    /// A missing file is an empty collection, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load(&self) -> Result<Vec<R>> {
        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|e| {
            PeopleError::Storage(format!(
                "failed to parse {}: {e}",
                self.file_path.display()
            ))
        })
    }

    /// Re-encodes the whole collection and overwrites the file.
    ///
    /// This is a plain overwrite of the target path. No lock is taken and no
    /// temporary file is used; see the module docs for the accepted race.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    fn save(&self, records: &[R]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| PeopleError::Storage(format!("failed to serialize JSON: {e}")))?;

        std::fs::write(&self.file_path, json)?;
        Ok(())
    }
}

impl<R: Record> Repository<R> for JsonRepository<R> {
    fn find_all(&self, filter: Option<&Filter>) -> Result<Vec<R>> {
        let _span = tracing::debug_span!("json_find_all").entered();

        let mut records = self.load()?;
        if let Some(filter) = filter {
            records.retain(|r| r.matches(filter));
        }

        tracing::debug!(count = records.len(), "retrieved records");
        Ok(records)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<R>> {
        let _span = tracing::debug_span!("json_find_by_id", id = %id).entered();

        let record = self.load()?.into_iter().find(|r| r.id() == id);

        tracing::debug!(found = record.is_some(), "record lookup complete");
        Ok(record)
    }

    fn create(&self, mut record: R) -> Result<R> {
        let _span = tracing::debug_span!("json_create").entered();

        if record.id().is_empty() {
            record.assign_id(generate_id());
        }

        let mut records = self.load()?;
        records.push(record.clone());
        self.save(&records)?;

        tracing::debug!(id = %record.id(), "record created");
        Ok(record)
    }

    fn update(&self, id: &str, patch: &R::Patch) -> Result<Option<R>> {
        let _span = tracing::debug_span!("json_update", id = %id).entered();

        let mut records = self.load()?;
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            tracing::debug!("record not found, nothing updated");
            return Ok(None);
        };

        record.apply_patch(patch);
        let updated = record.clone();
        self.save(&records)?;

        tracing::debug!("record updated");
        Ok(Some(updated))
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("json_delete", id = %id).entered();

        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            tracing::debug!("record not found, nothing deleted");
            return Ok(false);
        }

        self.save(&records)?;
        tracing::debug!("record deleted");
        Ok(true)
    }
}
