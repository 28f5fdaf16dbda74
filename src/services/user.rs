//! User account management.
//!
//! [`UserService`] handles registration and lookup of user accounts. It
//! enforces username uniqueness, which neither backend does on its own.
//! Password *hashing* is out of scope for this crate: callers hand over an
//! already-salted hash and this layer only stores it.

use crate::domain::{PeopleError, Result, User};
use crate::services::validation;
use crate::storage::{Filter, Repository, Store};

/// Service for user account operations.
pub struct UserService {
    store: Store<User>,
}

impl UserService {
    /// Creates the service over an opened store.
    #[must_use]
    pub fn new(store: Store<User>) -> Self {
        Self { store }
    }

    /// Registers a new user with a caller-supplied password hash.
    ///
    /// The username is trimmed and must be unique.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid username, an empty hash, or
    /// a username that is already taken; otherwise any storage failure.
    pub fn register(&self, username: &str, password_hash: &str) -> Result<User> {
        validation::username(username)?;
        if password_hash.is_empty() {
            return Err(PeopleError::Validation(
                "Password hash is required".to_string(),
            ));
        }

        let username = username.trim();
        let filter = Filter::from([("username".to_string(), username.to_string())]);
        if self.store.exists(&filter)? {
            return Err(PeopleError::Validation(format!(
                "Username '{username}' is already taken"
            )));
        }

        let user = self.store.create(User::new(username, password_hash))?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Looks up a user by unique username. `Ok(None)` if absent.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let filter = Filter::from([("username".to_string(), username.to_string())]);
        Ok(self.store.find_all(Some(&filter))?.into_iter().next())
    }

    /// Looks up a user by id. `Ok(None)` if absent.
    pub fn get(&self, user_id: &str) -> Result<Option<User>> {
        self.store.find_by_id(user_id)
    }
}
