//! Domain layer: the entity types and errors the rest of the crate is built on.
//!
//! This module contains the core record types and business rules, independent
//! of which storage backend is active or how the application is driven. It
//! deliberately knows nothing about MongoDB, files, or the CLI.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`person`]: The contact record and its partial-update patch
//! - [`user`]: The user account record

pub mod error;
pub mod person;
pub mod user;

pub use error::{PeopleError, Result};
pub use person::{Person, PersonPatch, LEGACY_OWNER};
pub use user::{User, UserPatch};

use chrono::{SecondsFormat, Utc};

/// Returns the current time as an RFC 3339 string with microsecond precision.
///
/// All persisted timestamps use this format. Fixed precision plus a `Z`
/// suffix keeps the strings lexicographically ordered by instant, which the
/// tests rely on when checking that `updated_at` advances.
#[must_use]
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
