//! Error types for the people-manager crate.
//!
//! This module defines the centralized error type [`PeopleError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for people-manager operations.
///
/// This enum consolidates all error conditions that can occur, from storage
/// operations to I/O failures and configuration issues. Most variants wrap
/// underlying errors from external crates using `#[from]` for automatic conversion.
///
/// The storage layer keeps its error taxonomy deliberately coarse: [`Storage`],
/// [`Io`] and [`Database`] all mean "the backend is unavailable or the call
/// failed" and callers are expected to treat them uniformly. A missing record
/// is never an error; it is reported as `Ok(None)` or `Ok(false)`.
///
/// [`Storage`]: PeopleError::Storage
/// [`Io`]: PeopleError::Io
/// [`Database`]: PeopleError::Database
#[derive(Debug, Error)]
pub enum PeopleError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the storage backend fails in a
    /// way not already covered by [`Io`](PeopleError::Io) or
    /// [`Database`](PeopleError::Database), such as malformed JSON on disk.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// MongoDB driver operation failed.
    ///
    /// Wraps connection and query errors from the `mongodb` crate. Like
    /// [`Io`](PeopleError::Io), this is a storage-unavailable condition from
    /// the caller's point of view.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input was rejected before reaching storage.
    ///
    /// Raised by the service layer for empty or over-long names, usernames
    /// below the minimum length and similar input problems. The string is a
    /// user-presentable message.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A specialized `Result` type for people-manager operations.
///
/// This is a type alias for `std::result::Result<T, PeopleError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, PeopleError>;
