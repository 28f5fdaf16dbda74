//! Input validation, applied before anything reaches storage.
//!
//! The storage backends perform no validation of their own; everything a
//! caller could get wrong is rejected here, in the service layer, as a
//! [`PeopleError::Validation`] with a user-presentable message.

use crate::domain::error::{PeopleError, Result};

/// Minimum contact name length, in characters, after trimming.
pub const NAME_MIN_LENGTH: usize = 2;

/// Maximum contact name length, in characters.
pub const NAME_MAX_LENGTH: usize = 200;

/// Maximum length of a contact's accumulated details text.
pub const DETAILS_MAX_LENGTH: usize = 50_000;

/// Minimum username length, in characters, after trimming.
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum username length, in characters.
pub const USERNAME_MAX_LENGTH: usize = 50;

/// Validates a contact name.
///
/// # Errors
///
/// Returns a validation error if the trimmed name is empty, shorter than
/// [`NAME_MIN_LENGTH`] or longer than [`NAME_MAX_LENGTH`].
pub fn person_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PeopleError::Validation("Name is required".to_string()));
    }
    let length = trimmed.chars().count();
    if length < NAME_MIN_LENGTH {
        return Err(PeopleError::Validation(format!(
            "Name must be at least {NAME_MIN_LENGTH} characters"
        )));
    }
    if length > NAME_MAX_LENGTH {
        return Err(PeopleError::Validation(format!(
            "Name must not exceed {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a contact's details text.
///
/// Empty details are fine; the only limit is overall size.
///
/// # Errors
///
/// Returns a validation error if the text exceeds [`DETAILS_MAX_LENGTH`].
pub fn person_details(details: &str) -> Result<()> {
    if details.chars().count() > DETAILS_MAX_LENGTH {
        return Err(PeopleError::Validation(format!(
            "Details are too long (max {DETAILS_MAX_LENGTH} characters)"
        )));
    }
    Ok(())
}

/// Validates a username.
///
/// # Errors
///
/// Returns a validation error if the trimmed username is empty, shorter
/// than [`USERNAME_MIN_LENGTH`] or longer than [`USERNAME_MAX_LENGTH`].
pub fn username(username: &str) -> Result<()> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(PeopleError::Validation("Username is required".to_string()));
    }
    let length = trimmed.chars().count();
    if length < USERNAME_MIN_LENGTH {
        return Err(PeopleError::Validation(format!(
            "Username must be at least {USERNAME_MIN_LENGTH} characters"
        )));
    }
    if length > USERNAME_MAX_LENGTH {
        return Err(PeopleError::Validation(format!(
            "Username must not exceed {USERNAME_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_names_are_rejected() {
        assert!(person_name("").is_err());
        assert!(person_name("   ").is_err());
    }

    #[test]
    fn one_character_name_is_too_short() {
        assert!(person_name("J").is_err());
        assert!(person_name(" J ").is_err());
    }

    #[test]
    fn two_character_name_is_accepted() {
        assert!(person_name("Jo").is_ok());
        assert!(person_name("  Jo  ").is_ok());
    }

    #[test]
    fn over_long_name_is_rejected() {
        assert!(person_name(&"x".repeat(NAME_MAX_LENGTH + 1)).is_err());
        assert!(person_name(&"x".repeat(NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn empty_details_are_fine() {
        assert!(person_details("").is_ok());
    }

    #[test]
    fn over_long_details_are_rejected() {
        assert!(person_details(&"x".repeat(DETAILS_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn short_usernames_are_rejected() {
        assert!(username("al").is_err());
        assert!(username("ali").is_ok());
    }
}
