//! Router, CORS policy and bootstrap.

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tictactable_core::GameSession;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument, warn};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::table::{GameTable, TableHandle};
use crate::ws;

/// Builds the HTTP router: `/ws` for game traffic, `/health` for probes.
#[instrument(skip(table))]
pub fn router(table: TableHandle, config: &ServerConfig) -> Result<Router, ServerError> {
    let origin = HeaderValue::from_str(config.allowed_origin()).map_err(|e| {
        ServerError::new(format!(
            "Invalid allowed origin {:?}: {}",
            config.allowed_origin(),
            e
        ))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST]);

    Ok(Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/health", get(health))
        .with_state(table)
        .layer(ServiceBuilder::new().layer(cors)))
}

#[instrument]
async fn health() -> &'static str {
    "ok"
}

/// Starts the table task and serves until Ctrl-C.
#[instrument]
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let (table, handle) = GameTable::new(GameSession::new());
    let table_task = tokio::spawn(table.run());

    let app = router(handle, &config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), origin = %config.allowed_origin(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    table_task.abort();
    Ok(())
}

#[instrument]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
