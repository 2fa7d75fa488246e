//! Application configuration. Environment, listener port, storage path, token lifetime.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GRPC_PORT: u16 = 44044;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// `local`, `dev` or `prod`. Selects the log level. Read from SSO_ENV.
    #[serde(default)]
    pub env: Option<String>,

    /// Path of the SQLite database file. Read from SSO_STORAGE_PATH.
    #[serde(default)]
    pub storage_path: Option<String>,

    /// Lifetime of issued tokens in seconds. Read from SSO_TOKEN_TTL_SECS.
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,

    /// gRPC listener port. Read from SSO_GRPC_PORT.
    #[serde(default)]
    pub grpc_port: Option<u16>,

    // ─────────────────────────────────────────────────────────────────────────
    // Default client application (seeded at startup when a secret is set)
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from SSO_APP_ID. Defaults to 1.
    #[serde(default)]
    pub app_id: Option<i32>,

    /// Read from SSO_APP_NAME. Defaults to "default".
    #[serde(default)]
    pub app_name: Option<String>,

    /// Token signing secret of the default app. Read from SSO_APP_SECRET.
    #[serde(default)]
    pub app_secret: Option<String>,
}

impl AppConfig {
    /// Load from `.env`, SSO_* environment variables, and the optional file named by SSO_CONFIG.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("SSO_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file.
        c = c.add_source(config::Environment::with_prefix("SSO").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn env_or_default(&self) -> &str {
        self.env.as_deref().unwrap_or("local")
    }

    pub fn storage_path_or_default(&self) -> &str {
        self.storage_path.as_deref().unwrap_or("./storage/sso.db")
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }

    pub fn grpc_port_or_default(&self) -> u16 {
        self.grpc_port.unwrap_or(DEFAULT_GRPC_PORT)
    }

    pub fn app_id_or_default(&self) -> i32 {
        self.app_id.unwrap_or(1)
    }

    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or("default")
    }

    /// Returns true if a default app should be seeded (secret present and non-empty).
    pub fn is_default_app_configured(&self) -> bool {
        self.app_secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}
