//! gRPC listener lifecycle: `Created → Running → Stopping → Stopped`.
//!
//! The serve loop runs on its own tokio task so the caller stays free to wait
//! for shutdown. Stopping cancels the listener's token; tonic then stops
//! accepting, drains in-flight calls, and the task completes.

use super::AppError;
use crate::adapters::grpc::AuthGateway;
use crate::ports::Auth;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Running,
    Stopping,
    Stopped,
}

pub struct GrpcApp {
    gateway: AuthGateway,
    port: u16,
    state: LifecycleState,
    shutdown: CancellationToken,
    serve: Option<JoinHandle<Result<(), tonic::transport::Error>>>,
}

impl GrpcApp {
    /// `port` 0 binds an ephemeral port.
    pub fn new(auth: Arc<dyn Auth>, port: u16) -> Self {
        Self {
            gateway: AuthGateway::new(auth),
            port,
            state: LifecycleState::Created,
            shutdown: CancellationToken::new(),
            serve: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Token that ends the serve loop when cancelled. `stop` cancels it too.
    #[cfg(test)]
    fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Bind the listener and spawn the serve loop. A bind failure is returned
    /// before anything is spawned; the caller treats it as fatal.
    pub async fn run(&mut self) -> Result<SocketAddr, AppError> {
        if self.state != LifecycleState::Created {
            return Err(AppError::InvalidState {
                op: "run",
                state: self.state,
            });
        }

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AppError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| AppError::Bind { addr, source })?;

        let service = self.gateway.clone().into_service();
        let token = self.shutdown.clone();
        self.serve = Some(tokio::spawn(async move {
            Server::builder()
                .add_service(service)
                .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
                    token.cancelled().await
                })
                .await
        }));

        self.state = LifecycleState::Running;
        info!(addr = %local_addr, "gRPC server started");
        Ok(local_addr)
    }

    /// Stop accepting and wait for in-flight calls to finish. Idempotent.
    pub async fn stop(&mut self) -> Result<(), AppError> {
        if self.state == LifecycleState::Stopped {
            return Ok(());
        }
        info!(port = self.port, "stopping gRPC server");

        self.state = LifecycleState::Stopping;
        self.shutdown.cancel();
        let result = match self.serve.take() {
            Some(handle) => match handle.await {
                Ok(served) => served.map_err(AppError::from),
                Err(e) => Err(AppError::from(e)),
            },
            None => Ok(()),
        };
        self.state = LifecycleState::Stopped;
        result
    }
}
