// Chart specification models consumed by the browser renderer
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Framework-agnostic description of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Line(LineChart),
    Pie(PieChart),
    Heatmap(HeatmapChart),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<u64>,
    pub range_slider: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<u32>,
    pub y: Vec<String>,
    /// One row per `y` entry, one column per `x` entry.
    pub z: Vec<Vec<u32>>,
}
