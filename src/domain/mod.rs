//! Core domain layer. No external I/O dependencies.
//!
//! Entities and error taxonomy live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{App, User};
pub use errors::{AuthError, StorageError};
