//! people-manager: a personal contacts manager with interchangeable storage.
//!
//! The crate stores small collections of contact records ("people") and the
//! user accounts that own them, persisting to either MongoDB or local JSON
//! files. The backend is chosen once at startup from configuration and every
//! operation afterwards is a single synchronous read or write through one
//! facade.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Service Layer (services/)                          │  ← Validation
//! │  - Ownership filter / legacy visibility             │  ← Business rules
//! │  - Note appending, search, registration             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage Facade (storage/)                          │  ← Store enum
//! │     ┌───────────────┐      ┌───────────────┐        │
//! │     │ Mongo Backend │      │ JSON Backend  │        │
//! │     │ (storage/     │      │ (storage/     │        │
//! │     │  mongo.rs)    │      │  json.rs)     │        │
//! │     └───────────────┘      └───────────────┘        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Person / User records, patches                   │
//! │  - Error types (domain/error)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: record types, patches and errors
//! - [`storage`]: the facade and the two backends
//! - [`services`]: validation, ownership and account rules
//! - [`observability`]: tracing subscriber setup
//!
//! # Backend Selection
//!
//! Setting `MONGO_URI` (or `mongo_uri` in the config file) selects MongoDB;
//! leaving it unset selects JSON files at the configured paths. The choice
//! happens once, in [`storage::open`], and is held as an immutable tagged
//! handle — no call site re-checks configuration.
//!
//! # Known Limitations
//!
//! The JSON backend takes no lock and writes in place. Concurrent writers
//! can lose updates or leave a truncated file; it is meant for
//! single-process local use. See [`storage::json`] for details.

pub mod domain;
pub mod observability;
pub mod services;
pub mod storage;

pub use domain::{PeopleError, Person, PersonPatch, Result, User, UserPatch};
pub use services::{PersonService, UserService};
pub use storage::{open, BackendKind, Filter, Repository, Store, Stores};

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file consulted when no explicit path is given.
const CONFIG_FILE: &str = "people-manager.toml";

/// Application configuration.
///
/// Loaded from a TOML file when one is present, otherwise from environment
/// variables, with typed fallback defaults for everything. The presence of
/// `mongo_uri` is the single switch between the two storage backends.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// MongoDB connection string. When set, the MongoDB backend is active.
    ///
    /// Environment variable: `MONGO_URI`.
    pub mongo_uri: Option<String>,

    /// MongoDB database name. Default: `people_manager`.
    ///
    /// Environment variable: `DB_NAME`.
    pub db_name: String,

    /// Collection name for contact records. Default: `people`.
    pub people_collection: String,

    /// Collection name for user accounts. Default: `users`.
    pub users_collection: String,

    /// JSON file for contact records when MongoDB is not configured.
    /// Default: `data.json`.
    ///
    /// Environment variable: `DATA_FILE`.
    pub data_file: PathBuf,

    /// JSON file for user accounts when MongoDB is not configured.
    /// Default: `users.json`.
    ///
    /// Environment variable: `USERS_FILE`.
    pub users_file: PathBuf,

    /// Log level used when `RUST_LOG` is not set.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `info`.
    ///
    /// Environment variable: `LOG_LEVEL`.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongo_uri: None,
            db_name: "people_manager".to_string(),
            people_collection: "people".to_string(),
            users_collection: "users".to_string(),
            data_file: PathBuf::from("data.json"),
            users_file: PathBuf::from("users.json"),
            log_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from environment variables.
    ///
    /// Unset or empty variables fall back to the defaults; an empty
    /// `MONGO_URI` counts as unset so an `.env` template with a blank value
    /// does not accidentally select MongoDB.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.mongo_uri = env_nonempty("MONGO_URI");
        if let Some(db_name) = env_nonempty("DB_NAME") {
            config.db_name = db_name;
        }
        if let Some(data_file) = env_nonempty("DATA_FILE") {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(users_file) = env_nonempty("USERS_FILE") {
            config.users_file = PathBuf::from(users_file);
        }
        config.log_level = env_nonempty("LOG_LEVEL");
        config
    }

    /// Parses a configuration from a TOML file.
    ///
    /// Missing keys take their defaults; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PeopleError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| PeopleError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Loads the configuration for this process.
    ///
    /// Uses `people-manager.toml` in the working directory when it exists,
    /// otherwise environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config file exists but is
    /// unreadable or malformed.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::from_env())
        }
    }

    /// Returns `true` when the MongoDB backend is selected.
    #[must_use]
    pub fn use_mongodb(&self) -> bool {
        self.mongo_uri.is_some()
    }

    /// Logs the effective storage selection at startup.
    pub fn validate(&self) {
        if self.use_mongodb() {
            tracing::info!(db = %self.db_name, "MongoDB storage enabled");
        } else {
            tracing::info!(
                data_file = ?self.data_file,
                users_file = ?self.users_file,
                "local JSON file storage enabled"
            );
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_selects_json_backend() {
        let config = Config::default();
        assert!(!config.use_mongodb());
        assert_eq!(config.db_name, "people_manager");
        assert_eq!(config.data_file, PathBuf::from("data.json"));
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("people-manager.toml");
        std::fs::write(
            &path,
            r#"
mongo_uri = "mongodb://localhost:27017"
db_name = "contacts_test"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.use_mongodb());
        assert_eq!(config.db_name, "contacts_test");
        assert_eq!(config.people_collection, "people");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("people-manager.toml");
        std::fs::write(&path, "mongo_uri = [broken").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(PeopleError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let missing = Path::new("/no/such/people-manager.toml");
        assert!(matches!(
            Config::from_file(missing),
            Err(PeopleError::Config(_))
        ));
    }
}
