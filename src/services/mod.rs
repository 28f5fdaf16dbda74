//! Service layer: business rules on top of the storage facade.
//!
//! Services own everything the storage layer deliberately does not do:
//! input validation, the per-user ownership filter, username uniqueness and
//! the append-only note convention. They are constructed once at startup
//! around the opened stores.
//!
//! # Modules
//!
//! - [`person`]: contact CRUD, note appending and search
//! - [`user`]: account registration and lookup
//! - [`validation`]: field-level input checks shared by both

pub mod person;
pub mod user;
pub mod validation;

pub use person::PersonService;
pub use user::UserService;
