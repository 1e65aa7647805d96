use serde::Serialize;
use std::collections::BTreeMap;

/// Every how many ticks the speed histogram is sampled (tick 0 included).
pub const HISTOGRAM_INTERVAL: u64 = 100;

/// Buckets per speed unit; 2.0 gives 0.5-wide bands.
pub const BUCKETS_PER_UNIT: f64 = 2.0;

/// Histogram key for a speed: `floor(speed * 2)`.
#[inline]
pub fn speed_bucket(speed: f64) -> u64 {
    (speed * BUCKETS_PER_UNIT).floor() as u64
}

/// Lower edge of a bucket in speed units.
#[inline]
pub fn bucket_lower_bound(bucket: u64) -> f64 {
    bucket as f64 / BUCKETS_PER_UNIT
}

/// Snapshot of a world's counters, handed to drivers for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStats {
    pub wall_collisions: u64,
    pub ball_collisions: u64,
    pub total_collisions: u64,
    pub velocity_histogram: BTreeMap<u64, u64>,
    /// Ticks completed so far.
    pub ticks: u64,
    /// Pair collisions whose impact angle could not be computed.
    pub skipped_impulses: u64,
    pub seed: Option<u64>,
}

impl SimulationStats {
    /// Number of speed samples recorded in the histogram.
    pub fn total_samples(&self) -> u64 {
        self.velocity_histogram.values().sum()
    }

    /// How many sampling passes a run of `ticks` ticks performs: `ceil(ticks / 100)`.
    pub fn sampling_events(ticks: u64) -> u64 {
        ticks.div_ceil(HISTOGRAM_INTERVAL)
    }

    /// `(lower speed bound, count)` pairs in ascending speed order.
    pub fn histogram_bins(&self) -> Vec<(f64, u64)> {
        self.velocity_histogram
            .iter()
            .map(|(&bucket, &count)| (bucket_lower_bound(bucket), count))
            .collect()
    }

    /// Mean speed estimated from bucket midpoints, `None` when nothing was sampled.
    pub fn mean_speed_estimate(&self) -> Option<f64> {
        let samples = self.total_samples();
        if samples == 0 {
            return None;
        }
        let half_width = 0.5 / BUCKETS_PER_UNIT;
        let weighted: f64 = self
            .velocity_histogram
            .iter()
            .map(|(&bucket, &count)| (bucket_lower_bound(bucket) + half_width) * count as f64)
            .sum();
        Some(weighted / samples as f64)
    }
}
