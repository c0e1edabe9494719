//! Server Implementation
//!
//! HTTP server startup and graceful shutdown

use std::net::SocketAddr;

use crate::api;
use crate::core::ServerState;

/// HTTP Server
pub struct Server {
    state: ServerState,
}

impl Server {
    /// Create server from initialized state
    pub fn with_state(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn run(&self) -> std::io::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let app = api::build_app(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("wercha-api listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
