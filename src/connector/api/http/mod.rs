//! Inbound HTTP API for the chat UI.

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::Request;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};
use uuid::Uuid;

use super::Container;

pub use error::{panic_response, ApiError};
pub use handlers::{get_health, post_chat, ChatResponse};

/// Build the axum application around a shared container.
pub fn app(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/chat", get(get_health).post(post_chat))
        .with_state(container)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            info_span!(
                "http",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %Uuid::new_v4(),
            )
        }))
}

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
