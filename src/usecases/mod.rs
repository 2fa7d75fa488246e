//! Application use cases. Orchestrate domain logic via ports.

pub mod auth_service;

pub use auth_service::AuthService;
