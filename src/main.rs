//! Wiring & DI. Entry point: load config, build storage and auth service, host the gRPC gateway.
//! No business logic here.

use anyhow::Context;
use sso::adapters::persistence::SqliteStorage;
use sso::app::{shutdown, App};
use sso::domain::App as ClientApp;
use sso::ports::{AppProvider, Auth, UserProvider, UserSaver};
use sso::shared::{config::AppConfig, logger};
use sso::usecases::AuthService;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::load().context("load config")?;
    logger::init(cfg.env_or_default());

    info!(
        env = cfg.env_or_default(),
        grpc_port = cfg.grpc_port_or_default(),
        storage_path = cfg.storage_path_or_default(),
        token_ttl_secs = cfg.token_ttl().as_secs(),
        "starting application"
    );

    // --- Storage ---
    let storage = Arc::new(
        SqliteStorage::connect(cfg.storage_path_or_default())
            .await
            .context("open storage")?,
    );
    if let Some(secret) = cfg.app_secret.clone().filter(|_| cfg.is_default_app_configured()) {
        let app = ClientApp {
            id: cfg.app_id_or_default(),
            name: cfg.app_name_or_default().to_string(),
            secret,
        };
        storage.upsert_app(&app).await.context("seed default app")?;
        info!(app_id = app.id, app_name = %app.name, "default app ready");
    }

    // --- Auth service (domain collaborator behind the gateway) ---
    let auth: Arc<dyn Auth> = Arc::new(AuthService::new(
        Arc::clone(&storage) as Arc<dyn UserSaver>,
        Arc::clone(&storage) as Arc<dyn UserProvider>,
        Arc::clone(&storage) as Arc<dyn AppProvider>,
        cfg.token_ttl(),
    ));

    // --- Host: bind failure is fatal ---
    let mut application = App::new(auth, cfg.grpc_port_or_default());
    if let Err(e) = application.start().await {
        error!(error = %e, "failed to start gRPC server");
        return Err(e.into());
    }

    let signal = application
        .shutdown_on(shutdown::termination_signal())
        .await
        .context("stop gRPC server")?
        .context("listen for termination signal")?;

    info!(signal, "stopping application");
    Ok(())
}
