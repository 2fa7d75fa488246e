//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{App, StorageError, User};

/// Persist new users.
#[async_trait::async_trait]
pub trait UserSaver: Send + Sync {
    /// Insert a user and return its id. `StorageError::UserExists` if the email is taken.
    async fn save_user(&self, email: &str, pass_hash: &str) -> Result<i64, StorageError>;
}

/// Look up users.
#[async_trait::async_trait]
pub trait UserProvider: Send + Sync {
    async fn user(&self, email: &str) -> Result<User, StorageError>;

    /// `StorageError::UserNotFound` when no user has this id.
    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError>;
}

/// Look up client applications.
#[async_trait::async_trait]
pub trait AppProvider: Send + Sync {
    async fn app(&self, app_id: i32) -> Result<App, StorageError>;
}
