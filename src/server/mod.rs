//! Webhook receiver: HTTP server setup and shutdown.

pub mod handlers;
mod routes;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;
use tokio::signal;

use crate::chat::{ChatClient, Platform, Targets};
use crate::error::{NotifierError, Result};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub targets: Arc<Targets>,
    pub client: Arc<ChatClient>,
    pub platform: Platform,
}

impl AppState {
    pub fn new(targets: Targets, client: ChatClient, platform: Platform) -> Self {
        Self {
            targets: Arc::new(targets),
            client: Arc::new(client),
            platform,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serves until Ctrl+C or SIGTERM.
    pub async fn serve(self) -> Result<()> {
        let ip: IpAddr = self.config.host.parse().map_err(|e| {
            NotifierError::Config(format!("Invalid host '{}': {e}", self.config.host))
        })?;
        let addr = SocketAddr::from((ip, self.config.port));

        let listener = TcpListener::bind(addr).await?;
        info!("Listening for GitLab webhooks on {addr}");

        axum::serve(listener, routes::create_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for CTRL+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received CTRL+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
