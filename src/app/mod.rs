//! Application host. Owns the gRPC listener for the lifetime of the process.
//!
//! `main` starts it, waits for a termination signal, then stops it in order.

pub mod grpc;
pub mod shutdown;

pub use grpc::{GrpcApp, LifecycleState};

use crate::ports::Auth;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bind gRPC listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("gRPC server failed: {0}")]
    Serve(#[from] tonic::transport::Error),

    #[error("gRPC server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("cannot {op} gRPC server in state {state:?}")]
    InvalidState {
        op: &'static str,
        state: LifecycleState,
    },
}

/// Process-wide host. One instance per process.
pub struct App {
    pub grpc: GrpcApp,
}

impl App {
    pub fn new(auth: Arc<dyn Auth>, grpc_port: u16) -> Self {
        Self {
            grpc: GrpcApp::new(auth, grpc_port),
        }
    }

    /// Start serving in the background. Returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr, AppError> {
        self.grpc.run().await
    }

    /// Block until `signal` resolves, then stop the listener gracefully.
    /// Returns whatever the signal produced (e.g. the signal name).
    pub async fn shutdown_on<F, T>(&mut self, signal: F) -> Result<T, AppError>
    where
        F: Future<Output = T>,
    {
        let received = signal.await;
        self.grpc.stop().await?;
        Ok(received)
    }
}
