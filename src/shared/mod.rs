//! Cross-cutting concerns: configuration and logging.

pub mod config;
pub mod logger;
