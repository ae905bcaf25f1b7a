//! Axum-based HTTP server.

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use journal_service::IdeaService;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::RpcError;
use crate::handlers;

/// Build the API router. CORS is permissive so the browser frontend can be
/// served from any origin.
pub fn create_router(service: Arc<IdeaService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/ideas",
            get(handlers::list_ideas).post(handlers::create_idea),
        )
        .route("/api/ideas/:id", get(handlers::get_idea))
        .route("/api/ideas/:id/vote", post(handlers::vote))
        .route("/api/ledger/ideas/:id", get(handlers::ledger_idea))
        .route("/api/aptos/ideas/:id", get(handlers::ledger_idea))
        .layer(cors)
        .with_state(service)
}

pub struct RpcServer {
    pub port: u16,
    service: Arc<IdeaService>,
}

impl RpcServer {
    pub fn new(port: u16, service: Arc<IdeaService>) -> Self {
        Self { port, service }
    }

    /// Bind `0.0.0.0:port` and serve until `shutdown` fires.
    pub async fn start(&self, shutdown: broadcast::Receiver<()>) -> Result<(), RpcError> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(format!("failed to bind {addr}: {e}")))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` fires.
    pub async fn serve(
        &self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), RpcError> {
        let local = listener
            .local_addr()
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!(
            addr = %local,
            external_mode = self.service.external_mode(),
            "HTTP API listening"
        );

        let app = create_router(Arc::clone(&self.service));
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;

        info!("HTTP API stopped");
        Ok(())
    }
}
