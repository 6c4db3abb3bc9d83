// Chart builders - Map generated samples to widget payloads
use crate::domain::chart::{ChartSpec, HeatmapChart, LineChart, PieChart};
use crate::domain::traffic::{
    HourlyTrafficHistogram, RevenueSeries, TrafficSample, VehicleDistribution,
};

pub fn traffic_text(sample: &TrafficSample) -> String {
    format!("{} vehicles/hour", sample.vehicles_per_hour)
}

pub fn revenue_chart(series: &RevenueSeries) -> ChartSpec {
    let (x, y) = series
        .points
        .iter()
        .map(|p| (p.time, p.cumulative))
        .unzip();

    ChartSpec::Line(LineChart {
        title: "Revenue Over Time".to_string(),
        x_label: "Time".to_string(),
        y_label: "Revenue".to_string(),
        x,
        y,
        range_slider: true,
    })
}

pub fn vehicle_chart(distribution: &VehicleDistribution) -> ChartSpec {
    let (labels, values) = distribution
        .counts
        .iter()
        .map(|(category, count)| (category.label().to_string(), *count))
        .unzip();

    ChartSpec::Pie(PieChart {
        title: "Vehicle Type Distribution".to_string(),
        labels,
        values,
    })
}

pub fn heatmap_chart(histogram: &HourlyTrafficHistogram) -> ChartSpec {
    ChartSpec::Heatmap(HeatmapChart {
        title: "Traffic Volume by Hour".to_string(),
        x_label: "Hour of Day".to_string(),
        y_label: "Traffic Volume".to_string(),
        x: (0..histogram.counts.len() as u32).collect(),
        y: vec!["Traffic".to_string()],
        z: vec![histogram.counts.clone()],
    })
}
