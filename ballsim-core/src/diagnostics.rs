//! Plain-text reporting for drivers
//!
//! Formats statistics for terminal output. Plotting stays with
//! the caller; these helpers only produce strings.

use crate::stats::{SimulationStats, BUCKETS_PER_UNIT};
use std::fmt::Write;

const BAR_WIDTH: u64 = 40;

/// One-line summary of the collision counters.
pub fn format_summary(stats: &SimulationStats) -> String {
    let mut line = format!(
        "ticks={} wall_collisions={} ball_collisions={} total_collisions={}",
        stats.ticks, stats.wall_collisions, stats.ball_collisions, stats.total_collisions
    );
    if stats.skipped_impulses > 0 {
        let _ = write!(line, " skipped_impulses={}", stats.skipped_impulses);
    }
    if let Some(seed) = stats.seed {
        let _ = write!(line, " seed={seed}");
    }
    line
}

/// Velocity histogram as rows of `[lo, hi) count bar`, scaled to the largest bucket.
pub fn format_histogram(stats: &SimulationStats) -> String {
    let max = stats.velocity_histogram.values().copied().max().unwrap_or(0);
    if max == 0 {
        return String::from("(no speed samples)\n");
    }

    let width = 1.0 / BUCKETS_PER_UNIT;
    let mut out = String::new();
    for (lo, count) in stats.histogram_bins() {
        let bar = (count * BAR_WIDTH).div_ceil(max) as usize;
        let _ = writeln!(
            out,
            "[{:>6.2}, {:>6.2}) {:>6} {}",
            lo,
            lo + width,
            count,
            "#".repeat(bar)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stats(hist: BTreeMap<u64, u64>) -> SimulationStats {
        SimulationStats {
            wall_collisions: 4,
            ball_collisions: 2,
            total_collisions: 6,
            velocity_histogram: hist,
            ticks: 200,
            skipped_impulses: 0,
            seed: Some(7),
        }
    }

    #[test]
    fn summary_lists_counters_and_seed() {
        let line = format_summary(&stats(BTreeMap::new()));
        assert_eq!(
            line,
            "ticks=200 wall_collisions=4 ball_collisions=2 total_collisions=6 seed=7"
        );
    }

    #[test]
    fn histogram_rows_are_sorted_and_scaled() {
        let text = format_histogram(&stats(BTreeMap::from([(10, 4), (3, 2)])));
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("[  1.50,   2.00)"));
        assert!(rows[0].ends_with(&"#".repeat(20)));
        assert!(rows[1].starts_with("[  5.00,   5.50)"));
        assert!(rows[1].ends_with(&"#".repeat(40)));
    }

    #[test]
    fn histogram_labels_span_one_bucket() {
        use crate::stats::bucket_lower_bound;
        let text = format_histogram(&stats(BTreeMap::from([(3, 1), (9, 1)])));
        for (row, bucket) in text.lines().zip([3u64, 9]) {
            let label = format!(
                "[{:>6.2}, {:>6.2})",
                bucket_lower_bound(bucket),
                bucket_lower_bound(bucket + 1)
            );
            assert!(row.starts_with(&label), "{row} should start with {label}");
        }
    }

    #[test]
    fn empty_histogram_says_so() {
        assert_eq!(format_histogram(&stats(BTreeMap::new())), "(no speed samples)\n");
    }
}
