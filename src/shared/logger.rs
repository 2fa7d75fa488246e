//! Tracing setup. The configured environment picks the default level; RUST_LOG overrides it.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const ENV_LOCAL: &str = "local";
pub const ENV_DEV: &str = "dev";

/// Default filter directive for `env`. Unknown environments log at info.
pub fn level_for_env(env: &str) -> &'static str {
    match env {
        ENV_LOCAL | ENV_DEV => "debug",
        _ => "info",
    }
}

/// Install the global subscriber. `local` gets the pretty formatter, everything else compact lines.
pub fn init(env: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_for_env(env).into());
    let registry = tracing_subscriber::registry().with(filter);
    if env == ENV_LOCAL {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}
