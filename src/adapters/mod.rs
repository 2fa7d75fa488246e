//! Infrastructure adapters. Implement ports or drive them.
//!
//! gRPC (inbound), SQLite (outbound), credential primitives. Map errors to domain errors.

pub mod grpc;
pub mod persistence;
pub mod security;
