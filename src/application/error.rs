// Application errors surfaced to HTTP clients
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown trigger: {0}")]
    UnknownTrigger(String),

    #[error("unknown widget: {0}")]
    UnknownWidget(String),

    #[error("failed to encode response: {0}")]
    Encode(String),
}
