// HTTP request handlers
use crate::application::error::DashboardError;
use crate::application::scheduler::tick_stream;
use crate::domain::dashboard::{DashboardSnapshot, Widget, WidgetUpdate};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::page::{render_page, static_asset};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::StreamExt;

#[derive(Deserialize)]
pub struct RefreshQuery {
    pub n_intervals: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub trigger: String,
    pub n_intervals: u64,
    pub updates: Vec<WidgetUpdate>,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::UnknownTrigger(id) => {
                tracing::warn!(trigger = %id, "Refresh for unknown trigger");
                StatusCode::NOT_FOUND
            }
            DashboardError::UnknownWidget(_) => StatusCode::NOT_FOUND,
            DashboardError::Encode(e) => {
                tracing::error!("Encoding error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard page with the current widget payloads rendered in
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, DashboardError> {
    let snapshot = state.dashboard.snapshot().await;
    Ok(Html(render_page(&snapshot)?))
}

pub async fn static_file(Path(asset): Path<String>) -> Response {
    match static_asset(&asset) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn layout(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot().await)
}

pub async fn widget(
    Path(widget_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Widget>, DashboardError> {
    state
        .dashboard
        .widget(&widget_id)
        .await
        .map(Json)
        .ok_or(DashboardError::UnknownWidget(widget_id))
}

/// Run one tick of a trigger and return the replaced payloads
pub async fn refresh(
    Path(trigger_id): Path<String>,
    Query(query): Query<RefreshQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let n_intervals = query.n_intervals.unwrap_or(0);
    let updates = state.dashboard.dispatch(&trigger_id, n_intervals).await?;

    let body = RefreshResponse {
        trigger: trigger_id,
        n_intervals,
        updates,
    };

    Ok(json_response(&body, accepts_brotli(&headers))
        .await
        .unwrap_or_else(|status| status.into_response()))
}

/// Push variant of `refresh`: the server owns the timer for this connection
pub async fn stream_refresh(
    Path(trigger_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, DashboardError> {
    let trigger = state.dashboard.trigger(&trigger_id)?.clone();
    let dashboard = state.dashboard.clone();

    tracing::debug!(trigger = %trigger.id, period_ms = trigger.period_ms(), "Opening refresh stream");

    let stream = async_stream::stream! {
        let mut ticks = Box::pin(tick_stream(trigger.period));
        while let Some(n_intervals) = ticks.next().await {
            let updates = match dashboard.dispatch(&trigger.id, n_intervals).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!("Stream dispatch failed: {}", e);
                    break;
                }
            };

            let body = RefreshResponse {
                trigger: trigger.id.clone(),
                n_intervals,
                updates,
            };
            match Event::default().event("refresh").json_data(&body) {
                Ok(event) => {
                    yield Ok::<Event, Infallible>(event);
                }
                Err(e) => {
                    tracing::error!("SSE serialization error: {}", e);
                    break;
                }
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
