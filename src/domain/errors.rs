//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Outcome of a failed call through the `Auth` capability.
///
/// The gateway matches on this exhaustively; anything it has no dedicated
/// protocol category for travels as `Other`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("{0}")]
    Other(String),
}

/// Storage-layer failures. `UserNotFound` is the signal the auth service
/// surfaces to the gateway as `AuthError::UserNotFound`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("storage error: {0}")]
    Backend(String),
}
