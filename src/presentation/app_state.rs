// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardServer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardServer>,
}
