//! Authentication use case: login, registration, role lookup.
//!
//! Implements the inbound `Auth` port over the storage ports. Storage and
//! crypto failures that the gateway has no category for become `AuthError::Other`.

use crate::adapters::security::{hash_password, issue_token, verify_password};
use crate::domain::{AuthError, StorageError};
use crate::ports::{AppProvider, Auth, UserProvider, UserSaver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct AuthService {
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            token_ttl,
        }
    }
}

fn other(op: &str, e: impl std::fmt::Display) -> AuthError {
    AuthError::Other(format!("{op}: {e}"))
}

#[async_trait::async_trait]
impl Auth for AuthService {
    async fn login(&self, email: &str, password: &str, app_id: i32) -> Result<String, AuthError> {
        debug!(app_id, "attempting to login user");

        let user = match self.user_provider.user(email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                warn!(app_id, "user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(other("auth.login", e)),
        };

        if !verify_password(&user.pass_hash, password) {
            warn!(user_id = user.id, "invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = self
            .app_provider
            .app(app_id)
            .await
            .map_err(|e| other("auth.login", e))?;

        let token =
            issue_token(&user, &app, self.token_ttl).map_err(|e| other("auth.login", e))?;

        info!(user_id = user.id, app_id, "user logged in successfully");
        Ok(token)
    }

    async fn register_new_user(&self, email: &str, password: &str) -> Result<i64, AuthError> {
        debug!("registering user");

        let pass_hash = hash_password(password).map_err(|e| other("auth.register", e))?;

        let user_id = match self.user_saver.save_user(email, &pass_hash).await {
            Ok(id) => id,
            Err(StorageError::UserExists) => {
                warn!("user already exists");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => return Err(other("auth.register", e)),
        };

        info!(user_id, "user registered");
        Ok(user_id)
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        debug!(user_id, "checking if user is admin");

        let is_admin = match self.user_provider.is_admin(user_id).await {
            Ok(flag) => flag,
            Err(StorageError::UserNotFound) => {
                warn!(user_id, "user not found");
                return Err(AuthError::UserNotFound);
            }
            Err(e) => return Err(other("auth.is_admin", e)),
        };

        info!(user_id, is_admin, "checked if user is admin");
        Ok(is_admin)
    }
}
