// Traffic and revenue domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const TRAFFIC_RANGE: std::ops::Range<u32> = 100..500;
pub const VEHICLE_COUNT_RANGE: std::ops::Range<u32> = 20..100;
pub const HOURLY_COUNT_RANGE: std::ops::Range<u32> = 50..500;
pub const REVENUE_STEP_RANGE: std::ops::Range<u32> = 5..20;

/// Number of samples in a revenue series (24h at 10-minute spacing).
pub const REVENUE_SAMPLES: usize = 144;
pub const REVENUE_SPACING_MINUTES: i64 = 10;
pub const HOURS_PER_DAY: usize = 24;

/// Vehicles per hour observed at the toll point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficSample {
    pub vehicles_per_hour: u32,
}

impl TrafficSample {
    pub fn new(vehicles_per_hour: u32) -> Self {
        Self { vehicles_per_hour }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VehicleCategory {
    Car,
    Truck,
    Bus,
    Motorcycle,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 4] = [
        VehicleCategory::Car,
        VehicleCategory::Truck,
        VehicleCategory::Bus,
        VehicleCategory::Motorcycle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleCategory::Car => "Car",
            VehicleCategory::Truck => "Truck",
            VehicleCategory::Bus => "Bus",
            VehicleCategory::Motorcycle => "Motorcycle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleDistribution {
    pub counts: Vec<(VehicleCategory, u32)>,
}

impl VehicleDistribution {
    pub fn new(counts: Vec<(VehicleCategory, u32)>) -> Self {
        Self { counts }
    }
}

/// Vehicle counts indexed by hour of day (0..24).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyTrafficHistogram {
    pub counts: Vec<u32>,
}

impl HourlyTrafficHistogram {
    pub fn new(counts: Vec<u32>) -> Self {
        Self { counts }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenuePoint {
    pub time: DateTime<Utc>,
    pub cumulative: u64,
}

impl RevenuePoint {
    pub fn new(time: DateTime<Utc>, cumulative: u64) -> Self {
        Self { time, cumulative }
    }
}

/// Cumulative toll revenue, oldest sample first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueSeries {
    pub points: Vec<RevenuePoint>,
}

impl RevenueSeries {
    pub fn new(points: Vec<RevenuePoint>) -> Self {
        Self { points }
    }
}
