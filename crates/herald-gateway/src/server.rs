// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use herald_config::{ServerConfig, VarSource};
use herald_core::HeraldError;
use herald_storage::ConnectionProvider;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Opens one store connection per request.
    pub provider: Arc<dyn ConnectionProvider>,
    /// Where `DB_*` and `ADMIN_API_KEY` are read from on each request.
    pub vars: Arc<dyn VarSource>,
}

impl GatewayState {
    pub fn new(provider: Arc<dyn ConnectionProvider>, vars: Arc<dyn VarSource>) -> Self {
        Self { provider, vars }
    }
}

/// Build the router:
/// - GET, OPTIONS /getdata
/// - GET, POST /init-db
/// - GET /db-status
/// - GET /health
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/getdata",
            get(handlers::get_data).options(handlers::preflight),
        )
        .route("/init-db", get(handlers::init_db).post(handlers::init_db))
        .route("/db-status", get(handlers::db_status))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until the process stops.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), HeraldError> {
    let app = router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HeraldError::Server {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| HeraldError::Server {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
