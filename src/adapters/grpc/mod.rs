//! gRPC adapter: wire messages, request validation, and the gateway service.

pub mod auth_server;
pub mod proto;
pub mod validation;

pub use auth_server::AuthGateway;
