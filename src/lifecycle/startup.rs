//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the service chain from validated configuration
//! - Bind the listener and run the HTTP server
//! - Route OS signals to the shutdown coordinator
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last, after the service chain is built

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::CatFactConfig;
use crate::http::ApiServer;
use crate::lifecycle::{signals, Shutdown};
use crate::service::{self, BuildError, FactService};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the configured service chain.
pub fn build_service(config: &CatFactConfig) -> Result<Arc<dyn FactService>, StartupError> {
    let service = service::from_config(&config.upstream)?;
    tracing::debug!(upstream = %config.upstream.url, "Service chain ready");
    Ok(service)
}

/// Server mode: serve until `shutdown` fires.
pub async fn serve(
    config: &CatFactConfig,
    service: Arc<dyn FactService>,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        upstream = %config.upstream.url,
        "Listening for connections"
    );

    let server = ApiServer::new(service, Router::new());
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}

/// Trigger `shutdown` on SIGINT / SIGTERM.
pub fn spawn_signal_handler(shutdown: Shutdown) {
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });
}
