//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the gRPC adapter into the application
//! - Outbound: Called by the application into storage

pub mod inbound;
pub mod outbound;

pub use inbound::Auth;
pub use outbound::{AppProvider, UserProvider, UserSaver};
