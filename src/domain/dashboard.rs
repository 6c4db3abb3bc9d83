// Dashboard domain model
use super::chart::ChartSpec;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Text,
    LineChart,
    PieChart,
    Heatmap,
}

/// Rendered content of a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum WidgetPayload {
    Text(String),
    Chart(ChartSpec),
}

impl WidgetPayload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WidgetPayload::Text(text) => Some(text),
            WidgetPayload::Chart(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Widget {
    pub id: String,
    pub kind: WidgetKind,
    /// Section heading shown above the widget, if any.
    pub heading: Option<String>,
    pub trigger: String,
    pub payload: WidgetPayload,
}

impl Widget {
    pub fn new(
        id: String,
        kind: WidgetKind,
        heading: Option<String>,
        trigger: String,
        payload: WidgetPayload,
    ) -> Self {
        Self {
            id,
            kind,
            heading,
            trigger,
            payload,
        }
    }
}

/// Replacement payload for one widget produced by a tick.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetUpdate {
    pub id: String,
    pub payload: WidgetPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    Stopped,
    Serving,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerInfo {
    pub id: String,
    pub period_ms: u64,
}

/// Point-in-time view of the whole dashboard, in layout order.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub title: String,
    pub state: ServerState,
    pub triggers: Vec<TriggerInfo>,
    pub widgets: Vec<Widget>,
}
