use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

/// Largest delay a browser `setInterval` honors (2^31 - 1 ms)
pub const MAX_INTERVAL_MS: u64 = i32::MAX as u64;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub title: String,
    pub refresh_interval_ms: u64,
    pub heatmap_interval_ms: u64,
    pub revenue_refresh: RefreshPolicy,
    pub heatmap_refresh: RefreshPolicy,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Whether a widget's data set is drawn once at startup or on every tick.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    Frozen,
    PerTick,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Live Traffic and Revenue Dashboard".to_string(),
            refresh_interval_ms: 5000,
            heatmap_interval_ms: 10000,
            revenue_refresh: RefreshPolicy::Frozen,
            heatmap_refresh: RefreshPolicy::PerTick,
            seed: None,
        }
    }
}

fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let defaults = DashboardSettings::default();
    Ok(config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8050)?
        .set_default("dashboard.title", defaults.title)?
        .set_default("dashboard.refresh_interval_ms", defaults.refresh_interval_ms)?
        .set_default("dashboard.heatmap_interval_ms", defaults.heatmap_interval_ms)?
        .set_default("dashboard.revenue_refresh", "frozen")?
        .set_default("dashboard.heatmap_refresh", "per_tick")?)
}

fn finish(settings: config::Config) -> anyhow::Result<AppConfig> {
    let app_config: AppConfig = settings.try_deserialize()?;
    for (key, period) in [
        ("refresh_interval_ms", app_config.dashboard.refresh_interval_ms),
        ("heatmap_interval_ms", app_config.dashboard.heatmap_interval_ms),
    ] {
        if period == 0 {
            anyhow::bail!("dashboard.{key} must be greater than zero");
        }
        // Browser timers treat longer delays as zero
        if period > MAX_INTERVAL_MS {
            anyhow::bail!("dashboard.{key} must be at most {MAX_INTERVAL_MS} ms, got {period}");
        }
    }
    Ok(app_config)
}

/// `DASHBOARD__SECTION__KEY` variables, read from `vars` instead of the process env when given
fn env_overlay(vars: Option<HashMap<String, String>>) -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .prefix_separator("__")
        .separator("__")
        .source(vars)
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(env_overlay(None))
        .build()?;

    finish(settings)
}

/// Replace `${name}` placeholders in a template in one left-to-right pass.
/// Substituted values are never rescanned; unknown placeholders are kept as is.
pub fn render_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}').and_then(|end| vars.get(&after[..end]).map(|v| (end, v))) {
            Some((end, value)) => {
                result.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                result.push_str("${");
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_from_toml(toml: &str) -> anyhow::Result<AppConfig> {
        let settings = builder_with_defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        finish(settings)
    }

    #[test]
    fn test_render_template() {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Live Traffic".to_string());
        vars.insert("traffic".to_string(), "250 vehicles/hour".to_string());

        let template = "<h1>${title}</h1><h2 id=\"live-traffic\">${traffic}</h2>";
        let result = render_template(template, &vars);

        assert_eq!(
            result,
            "<h1>Live Traffic</h1><h2 id=\"live-traffic\">250 vehicles/hour</h2>"
        );
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = load_from_toml("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.dashboard.refresh_interval_ms, 5000);
        assert_eq!(config.dashboard.heatmap_interval_ms, 10000);
        assert_eq!(config.dashboard.revenue_refresh, RefreshPolicy::Frozen);
        assert_eq!(config.dashboard.heatmap_refresh, RefreshPolicy::PerTick);
        assert_eq!(config.dashboard.seed, None);
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "127.0.0.1:8050".parse().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = load_from_toml(
            r#"
            [server]
            port = 9000

            [dashboard]
            revenue_refresh = "per_tick"
            heatmap_refresh = "frozen"
            heatmap_interval_ms = 5000
            seed = 11
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.dashboard.revenue_refresh, RefreshPolicy::PerTick);
        assert_eq!(config.dashboard.heatmap_refresh, RefreshPolicy::Frozen);
        assert_eq!(config.dashboard.heatmap_interval_ms, 5000);
        assert_eq!(config.dashboard.seed, Some(11));
    }

    #[test]
    fn test_render_template_single_pass() {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Ops ${widgets}".to_string());
        vars.insert("widgets".to_string(), "<div>charts</div>".to_string());

        let result = render_template("<h1>${title}</h1>${widgets}${missing}", &vars);

        assert_eq!(result, "<h1>Ops ${widgets}</h1><div>charts</div>${missing}");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = load_from_toml("[dashboard]\nrefresh_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_interval_above_timer_limit_rejected() {
        let err = load_from_toml("[dashboard]\nheatmap_interval_ms = 2147483648\n").unwrap_err();
        assert!(err.to_string().contains("heatmap_interval_ms must be at most 2147483647"));

        let config = load_from_toml("[dashboard]\nheatmap_interval_ms = 2147483647\n").unwrap();
        assert_eq!(config.dashboard.heatmap_interval_ms, MAX_INTERVAL_MS);
    }

    #[test]
    fn test_env_overlay_overrides_file() {
        let vars = HashMap::from([
            ("DASHBOARD__SERVER__PORT".to_string(), "9001".to_string()),
            ("DASHBOARD__DASHBOARD__REVENUE_REFRESH".to_string(), "per_tick".to_string()),
            ("OTHER__SERVER__PORT".to_string(), "1".to_string()),
        ]);
        let settings = builder_with_defaults()
            .unwrap()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\n",
                config::FileFormat::Toml,
            ))
            .add_source(env_overlay(Some(vars)))
            .build()
            .unwrap();
        let config = finish(settings).unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.dashboard.revenue_refresh, RefreshPolicy::PerTick);
        assert_eq!(config.dashboard.heatmap_refresh, RefreshPolicy::PerTick);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(load_from_toml("[dashboard]\nrevenue_refresh = \"hourly\"\n").is_err());
    }
}
