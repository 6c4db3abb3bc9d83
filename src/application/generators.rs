// Synthetic data generators - Random demo samples for every widget
use crate::application::random_source::RandomSource;
use crate::domain::traffic::{
    HOURLY_COUNT_RANGE, HOURS_PER_DAY, HourlyTrafficHistogram, REVENUE_SAMPLES,
    REVENUE_SPACING_MINUTES, REVENUE_STEP_RANGE, RevenuePoint, RevenueSeries, TRAFFIC_RANGE,
    TrafficSample, VEHICLE_COUNT_RANGE, VehicleCategory, VehicleDistribution,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct SyntheticDataGenerator {
    source: Arc<dyn RandomSource>,
}

impl SyntheticDataGenerator {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    pub fn traffic_sample(&self) -> TrafficSample {
        TrafficSample::new(self.source.uniform(TRAFFIC_RANGE))
    }

    pub fn vehicle_distribution(&self) -> VehicleDistribution {
        let counts = VehicleCategory::ALL
            .iter()
            .map(|category| (*category, self.source.uniform(VEHICLE_COUNT_RANGE)))
            .collect();
        VehicleDistribution::new(counts)
    }

    pub fn hourly_histogram(&self) -> HourlyTrafficHistogram {
        let counts = (0..HOURS_PER_DAY)
            .map(|_| self.source.uniform(HOURLY_COUNT_RANGE))
            .collect();
        HourlyTrafficHistogram::new(counts)
    }

    /// Trailing 24h of cumulative revenue ending at `now`, oldest first.
    pub fn revenue_series(&self, now: DateTime<Utc>) -> RevenueSeries {
        let mut total: u64 = 0;
        let points = (0..REVENUE_SAMPLES)
            .map(|i| {
                let steps_back = (REVENUE_SAMPLES - 1 - i) as i64;
                let time = now - Duration::minutes(steps_back * REVENUE_SPACING_MINUTES);
                total += u64::from(self.source.uniform(REVENUE_STEP_RANGE));
                RevenuePoint::new(time, total)
            })
            .collect();
        RevenueSeries::new(points)
    }
}
