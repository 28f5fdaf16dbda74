//! Observability: tracing subscriber setup.
//!
//! The rest of the crate emits structured events and spans through the
//! `tracing` macros; this module installs the subscriber that renders them.

pub mod init;

pub use init::init_tracing;
