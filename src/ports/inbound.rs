//! Inbound port. The gRPC adapter calls into the application through it.

use crate::domain::AuthError;

/// Authentication capability the gateway depends on.
///
/// Implemented by `usecases::AuthService` in production; tests substitute
/// their own implementation.
#[async_trait::async_trait]
pub trait Auth: Send + Sync {
    /// Verify credentials for `app_id` and issue a bearer token.
    async fn login(&self, email: &str, password: &str, app_id: i32) -> Result<String, AuthError>;

    /// Create a user and return the assigned id.
    async fn register_new_user(&self, email: &str, password: &str) -> Result<i64, AuthError>;

    /// Whether the user holds the admin role.
    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError>;
}
