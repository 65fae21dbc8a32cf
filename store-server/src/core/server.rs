//! Server Implementation
//!
//! HTTP server startup and graceful shutdown

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::core::{Config, Result, ServerState};
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        let state = ServerState::initialize(&self.config).await?;

        let app = build_app().with_state(state);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Store server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Store server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
