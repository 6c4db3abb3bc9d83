// Polling scheduler - Interval triggers and tick streams
use futures::Stream;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

pub const MAIN_TRIGGER: &str = "interval-update";
pub const HEATMAP_TRIGGER: &str = "heatmap-interval";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTrigger {
    pub id: String,
    pub period: Duration,
}

impl IntervalTrigger {
    pub fn new(id: impl Into<String>, period: Duration) -> Self {
        Self {
            id: id.into(),
            period,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period.as_millis() as u64
    }
}

/// Yields `0, 1, 2, ...`: the first tick immediately, then one per `period`.
///
/// Late ticks are delayed rather than bursted; the counter never skips.
pub fn tick_stream(period: Duration) -> impl Stream<Item = u64> + Send + 'static {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut n_intervals: u64 = 0;
    IntervalStream::new(timer).map(move |_| {
        let tick = n_intervals;
        n_intervals += 1;
        tick
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;

    #[test]
    fn test_period_ms() {
        let trigger = IntervalTrigger::new(MAIN_TRIGGER, Duration::from_millis(5000));
        assert_eq!(trigger.period_ms(), 5000);
        assert_eq!(trigger.id, "interval-update");
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_stream_counts_from_zero() {
        let mut ticks = pin!(tick_stream(Duration::from_millis(5000)));

        let start = tokio::time::Instant::now();
        assert_eq!(ticks.next().await, Some(0));
        assert!(start.elapsed() < Duration::from_millis(1));

        assert_eq!(ticks.next().await, Some(1));
        assert_eq!(ticks.next().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(10_000));
    }
}
