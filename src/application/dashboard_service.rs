// Dashboard server - Widget table, trigger bindings and tick dispatch
use crate::application::chart_builders::{heatmap_chart, revenue_chart, traffic_text, vehicle_chart};
use crate::application::error::DashboardError;
use crate::application::generators::SyntheticDataGenerator;
use crate::application::scheduler::{HEATMAP_TRIGGER, IntervalTrigger, MAIN_TRIGGER};
use crate::domain::dashboard::{
    DashboardSnapshot, ServerState, TriggerInfo, Widget, WidgetKind, WidgetPayload, WidgetUpdate,
};
use crate::infrastructure::config::{DashboardSettings, RefreshPolicy};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const TRAFFIC_WIDGET: &str = "live-traffic";
pub const REVENUE_WIDGET: &str = "revenue-chart";
pub const VEHICLE_WIDGET: &str = "vehicle-pie-chart";
pub const HEATMAP_WIDGET: &str = "traffic-heatmap";

type WidgetHandler = Arc<dyn Fn(u64) -> WidgetPayload + Send + Sync>;

struct HandlerBinding {
    trigger: String,
    widget_id: String,
    handler: WidgetHandler,
}

pub struct DashboardServer {
    title: String,
    triggers: Vec<IntervalTrigger>,
    bindings: Vec<HandlerBinding>,
    widgets: RwLock<Vec<Widget>>,
    state: RwLock<ServerState>,
}

impl DashboardServer {
    pub fn new(settings: &DashboardSettings, generator: SyntheticDataGenerator) -> Self {
        let triggers = vec![
            IntervalTrigger::new(
                MAIN_TRIGGER,
                Duration::from_millis(settings.refresh_interval_ms),
            ),
            IntervalTrigger::new(
                HEATMAP_TRIGGER,
                Duration::from_millis(settings.heatmap_interval_ms),
            ),
        ];

        let layout: Vec<(&str, &str, WidgetKind, Option<&str>, WidgetHandler)> = vec![
            (
                MAIN_TRIGGER,
                TRAFFIC_WIDGET,
                WidgetKind::Text,
                Some("Current Traffic Volume"),
                traffic_handler(generator.clone()),
            ),
            (
                MAIN_TRIGGER,
                REVENUE_WIDGET,
                WidgetKind::LineChart,
                None,
                revenue_handler(generator.clone(), settings.revenue_refresh),
            ),
            (
                MAIN_TRIGGER,
                VEHICLE_WIDGET,
                WidgetKind::PieChart,
                None,
                vehicle_handler(generator.clone()),
            ),
            (
                HEATMAP_TRIGGER,
                HEATMAP_WIDGET,
                WidgetKind::Heatmap,
                None,
                heatmap_handler(generator, settings.heatmap_refresh),
            ),
        ];

        let mut bindings = Vec::with_capacity(layout.len());
        let mut widgets = Vec::with_capacity(layout.len());
        for (trigger, widget_id, kind, heading, handler) in layout {
            widgets.push(Widget::new(
                widget_id.to_string(),
                kind,
                heading.map(str::to_string),
                trigger.to_string(),
                handler(0),
            ));
            bindings.push(HandlerBinding {
                trigger: trigger.to_string(),
                widget_id: widget_id.to_string(),
                handler,
            });
        }

        Self {
            title: settings.title.clone(),
            triggers,
            bindings,
            widgets: RwLock::new(widgets),
            state: RwLock::new(ServerState::Stopped),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn triggers(&self) -> &[IntervalTrigger] {
        &self.triggers
    }

    pub fn trigger(&self, id: &str) -> Result<&IntervalTrigger, DashboardError> {
        self.triggers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DashboardError::UnknownTrigger(id.to_string()))
    }

    /// Run every handler bound to `trigger_id` and store the new payloads.
    pub async fn dispatch(
        &self,
        trigger_id: &str,
        n_intervals: u64,
    ) -> Result<Vec<WidgetUpdate>, DashboardError> {
        self.trigger(trigger_id)?;

        // Ticks are generated and stored under one write guard and never interleave.
        let mut widgets = self.widgets.write().await;
        let updates: Vec<WidgetUpdate> = self
            .bindings
            .iter()
            .filter(|b| b.trigger == trigger_id)
            .map(|b| WidgetUpdate {
                id: b.widget_id.clone(),
                payload: (b.handler)(n_intervals),
            })
            .collect();

        for update in &updates {
            if let Some(widget) = widgets.iter_mut().find(|w| w.id == update.id) {
                widget.payload = update.payload.clone();
            }
        }
        drop(widgets);

        tracing::debug!(
            trigger = trigger_id,
            n_intervals,
            widgets = updates.len(),
            "Dispatched tick"
        );

        Ok(updates)
    }

    pub async fn widget(&self, id: &str) -> Option<Widget> {
        self.widgets.read().await.iter().find(|w| w.id == id).cloned()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            title: self.title.clone(),
            state: self.state().await,
            triggers: self
                .triggers
                .iter()
                .map(|t| TriggerInfo {
                    id: t.id.clone(),
                    period_ms: t.period_ms(),
                })
                .collect(),
            widgets: self.widgets.read().await.clone(),
        }
    }

    pub async fn state(&self) -> ServerState {
        *self.state.read().await
    }

    /// Stopped -> Serving. There is no way back.
    pub async fn mark_serving(&self) {
        let mut state = self.state.write().await;
        if *state == ServerState::Stopped {
            *state = ServerState::Serving;
            tracing::info!(title = %self.title, "Dashboard serving");
        }
    }
}

fn traffic_handler(generator: SyntheticDataGenerator) -> WidgetHandler {
    Arc::new(move |_| WidgetPayload::Text(traffic_text(&generator.traffic_sample())))
}

fn vehicle_handler(generator: SyntheticDataGenerator) -> WidgetHandler {
    Arc::new(move |_| WidgetPayload::Chart(vehicle_chart(&generator.vehicle_distribution())))
}

fn revenue_handler(generator: SyntheticDataGenerator, policy: RefreshPolicy) -> WidgetHandler {
    match policy {
        RefreshPolicy::Frozen => {
            let chart = revenue_chart(&generator.revenue_series(Utc::now()));
            Arc::new(move |_| WidgetPayload::Chart(chart.clone()))
        }
        RefreshPolicy::PerTick => Arc::new(move |_| {
            WidgetPayload::Chart(revenue_chart(&generator.revenue_series(Utc::now())))
        }),
    }
}

fn heatmap_handler(generator: SyntheticDataGenerator, policy: RefreshPolicy) -> WidgetHandler {
    match policy {
        RefreshPolicy::Frozen => {
            let chart = heatmap_chart(&generator.hourly_histogram());
            Arc::new(move |_| WidgetPayload::Chart(chart.clone()))
        }
        RefreshPolicy::PerTick => {
            Arc::new(move |_| WidgetPayload::Chart(heatmap_chart(&generator.hourly_histogram())))
        }
    }
}
