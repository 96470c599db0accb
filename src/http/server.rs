//! HTTP server setup and the `/catfact` handler.
//!
//! # Responsibilities
//! - Register the single `GET /catfact` route on a caller-supplied Router
//! - Wire up middleware (tracing, request ID)
//! - Translate fetch results into 200 / 422 JSON responses
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::http::response::{write_json, ErrorBody};
use crate::service::{Context, FactService};

/// Path of the only endpoint.
pub const CATFACT_PATH: &str = "/catfact";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn FactService>,
}

/// HTTP front end for a [`FactService`].
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Register the fact route on `router`.
    ///
    /// Routes already present on `router` are kept; the request ID and trace
    /// layers apply only to the fact route.
    pub fn new(service: Arc<dyn FactService>, router: Router) -> Self {
        let routes = Router::new()
            .route(CATFACT_PATH, get(handle_get_cat_fact))
            .with_state(AppState { service })
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Self {
            router: router.merge(routes),
        }
    }

    /// The assembled router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Each request gets a fresh background context; a dropped connection drops
/// this future and the upstream call with it. Failures are already logged by
/// the service chain.
async fn handle_get_cat_fact(State(state): State<AppState>) -> Response {
    match state.service.fetch(&Context::background()).await {
        Ok(fact) => write_json(StatusCode::OK, &fact),
        Err(err) => write_json(StatusCode::UNPROCESSABLE_ENTITY, ErrorBody::from(&err)),
    }
}
