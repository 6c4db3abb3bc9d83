// Server-side rendering of the dashboard page and its static assets
use crate::application::error::DashboardError;
use crate::domain::dashboard::{DashboardSnapshot, Widget};
use crate::infrastructure::config::render_template;
use std::collections::HashMap;

const INDEX_TEMPLATE: &str = include_str!("static/index.html");

pub struct Asset {
    pub body: &'static str,
    pub content_type: &'static str,
}

pub fn static_asset(path: &str) -> Option<Asset> {
    match path {
        "dashboard.js" => Some(Asset {
            body: include_str!("static/dashboard.js"),
            content_type: "application/javascript; charset=utf-8",
        }),
        _ => None,
    }
}

pub fn render_page(snapshot: &DashboardSnapshot) -> Result<String, DashboardError> {
    let widgets: Vec<String> = snapshot.widgets.iter().map(render_widget).collect();

    let initial_state =
        serde_json::to_string(snapshot).map_err(|e| DashboardError::Encode(e.to_string()))?;

    let mut vars = HashMap::new();
    vars.insert("title".to_string(), escape_html(&snapshot.title));
    vars.insert("widgets".to_string(), widgets.join("\n"));
    // `</script>` inside the JSON would end the script element early
    vars.insert("initial_state".to_string(), initial_state.replace("</", "<\\/"));

    Ok(render_template(INDEX_TEMPLATE, &vars))
}

fn render_widget(widget: &Widget) -> String {
    let heading = widget
        .heading
        .as_deref()
        .map(|h| format!("<h3>{}</h3>", escape_html(h)))
        .unwrap_or_default();

    match widget.payload.as_text() {
        Some(text) => format!(
            "    <div class=\"text-center m-4\">{heading}<h2 id=\"{}\" style=\"color: blue\">{}</h2></div>",
            escape_html(&widget.id),
            escape_html(text)
        ),
        None => format!(
            "    <div class=\"m-2\">{heading}<div id=\"{}\" class=\"graph\"></div></div>",
            escape_html(&widget.id)
        ),
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartSpec, PieChart};
    use crate::domain::dashboard::{ServerState, TriggerInfo, WidgetKind, WidgetPayload};

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            title: "Traffic <Demo>".to_string(),
            state: ServerState::Serving,
            triggers: vec![TriggerInfo {
                id: "interval-update".to_string(),
                period_ms: 5000,
            }],
            widgets: vec![
                Widget::new(
                    "live-traffic".to_string(),
                    WidgetKind::Text,
                    Some("Current Traffic Volume".to_string()),
                    "interval-update".to_string(),
                    WidgetPayload::Text("321 vehicles/hour".to_string()),
                ),
                Widget::new(
                    "vehicle-pie-chart".to_string(),
                    WidgetKind::PieChart,
                    None,
                    "interval-update".to_string(),
                    WidgetPayload::Chart(ChartSpec::Pie(PieChart {
                        title: "</script><b>".to_string(),
                        labels: vec!["Car".to_string()],
                        values: vec![40],
                    })),
                ),
            ],
        }
    }

    #[test]
    fn test_render_page_contains_widgets() {
        let html = render_page(&snapshot()).unwrap();

        assert!(html.contains("<h1>Traffic &lt;Demo&gt;</h1>"));
        assert!(html.contains("<h3>Current Traffic Volume</h3>"));
        assert!(html.contains(
            "<h2 id=\"live-traffic\" style=\"color: blue\">321 vehicles/hour</h2>"
        ));
        assert!(html.contains("<div id=\"vehicle-pie-chart\" class=\"graph\"></div>"));
        assert!(!html.contains("${"));
    }

    #[test]
    fn test_title_placeholders_are_literal() {
        let mut snapshot = snapshot();
        snapshot.title = "Ops ${widgets}".to_string();

        let html = render_page(&snapshot).unwrap();

        assert!(html.contains("<h1>Ops ${widgets}</h1>"));
        assert_eq!(html.matches("id=\"vehicle-pie-chart\"").count(), 1);
    }

    #[test]
    fn test_initial_state_cannot_close_script() {
        let html = render_page(&snapshot()).unwrap();
        let start = html.find("id=\"initial-state\"").unwrap();
        let script = &html[start..];
        let end = script.find("</script>").unwrap();
        assert!(script[..end].contains("<\\/script>"));
    }

    #[test]
    fn test_static_asset_lookup() {
        let asset = static_asset("dashboard.js").unwrap();
        assert!(asset.content_type.starts_with("application/javascript"));
        assert!(asset.body.contains("/api/refresh/"));
        assert!(static_asset("missing.js").is_none());
    }
}
