// Route table and server entry
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    health_check, index, layout, refresh, static_file, stream_refresh, widget,
};
use anyhow::Context;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Refresh payloads are compressed in `json_response`, so no CompressionLayer here
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/static/*asset", get(static_file))
        .route("/api/layout", get(layout))
        .route("/api/widgets/:widget_id", get(widget))
        .route("/api/refresh/:trigger_id", get(refresh))
        .route("/api/stream/:trigger_id", get(stream_refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the dashboard listener; failure is fatal at startup
pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))
}

/// Serve on an already-bound listener until the process ends
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    state.dashboard.mark_serving().await;
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
