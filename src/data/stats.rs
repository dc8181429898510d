//! Robust summary statistics over a capture.
//!
//! Landmarks are percentile-based so isolated glare spikes do not drag the
//! baseline, and a constant dark offset does not hide the peaks. Recomputed
//! from scratch whenever the dataset changes, once per load rather than per
//! frame.

use super::Dataset;
use crate::constants::stats::{
    BASELINE_EPSILON, BASELINE_PERCENTILE, PEAK_PERCENTILE, THRESHOLD_MULTIPLIER,
};

/// Distribution landmarks for a capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlareStats {
    /// 5th-percentile reading, the ambient light level
    pub baseline: f64,
    /// 95th-percentile reading, the typical glare peak
    pub peak: f64,
    /// Peak over baseline, guarded against a near-zero baseline
    pub ratio: f64,
    /// Alert threshold: readings above this count as glare events
    pub threshold: f64,
}

/// Compute statistics for a dataset. None iff the dataset is empty.
///
/// O(n log n) per call; expected once per dataset load.
pub fn compute_stats(dataset: &Dataset) -> Option<GlareStats> {
    if dataset.is_empty() {
        return None;
    }

    let mut sorted = dataset.values().to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let baseline = percentile(&sorted, BASELINE_PERCENTILE);
    let peak = percentile(&sorted, PEAK_PERCENTILE);

    Some(GlareStats {
        baseline,
        peak,
        ratio: peak / baseline.max(BASELINE_EPSILON),
        threshold: baseline * THRESHOLD_MULTIPLIER,
    })
}

/// Nearest-rank percentile on an ascending slice.
///
/// No interpolation: stable on noisy small samples, at the cost of only
/// approximating the true percentile for small n. Half-way ranks resolve
/// to the even neighbor, so a 0.05 percentile over eleven samples selects
/// the first element rather than the second.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = (p * (sorted.len() - 1) as f64).round_ties_even() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_has_no_stats() {
        assert_eq!(compute_stats(&Dataset::default()), None);
    }

    #[test]
    fn test_spike_capture() {
        // Ten low readings plus one glare spike
        let values: Vec<f64> = (1..=10).map(|i| i as f64).chain([100.0]).collect();
        let stats = compute_stats(&Dataset::from_values(values)).unwrap();

        assert_eq!(stats.baseline, 1.0);
        assert_eq!(stats.peak, 100.0);
        assert_eq!(stats.threshold, 10.0);
        assert!((stats.ratio - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_halfway_rank_resolves_low() {
        // Eleven samples put the baseline rank exactly at 0.5; it must pick
        // index 0, not round up to index 1.
        let values: Vec<f64> = (0..11).map(|i| (i * 10) as f64).collect();
        let stats = compute_stats(&Dataset::from_values(values)).unwrap();
        assert_eq!(stats.baseline, 0.0);
        assert_eq!(stats.peak, 100.0);
    }

    #[test]
    fn test_constant_values_collapse_landmarks() {
        let stats = compute_stats(&Dataset::from_values(vec![4.0; 20])).unwrap();
        assert_eq!(stats.baseline, stats.peak);
        assert_eq!(stats.threshold, 40.0);
    }

    #[test]
    fn test_baseline_never_exceeds_peak() {
        for n in [2usize, 3, 7, 50, 999] {
            let values: Vec<f64> = (0..n).map(|i| ((i * 37) % 101) as f64).collect();
            let stats = compute_stats(&Dataset::from_values(values)).unwrap();
            assert!(stats.baseline <= stats.peak, "n = {n}");
        }
    }

    #[test]
    fn test_threshold_is_exactly_ten_baselines() {
        let values = vec![0.125, 0.5, 1.75, 3.0, 9.5];
        let stats = compute_stats(&Dataset::from_values(values)).unwrap();
        assert_eq!(stats.threshold, stats.baseline * 10.0);
    }

    #[test]
    fn test_zero_baseline_is_guarded() {
        let stats = compute_stats(&Dataset::from_values(vec![0.0; 19])).unwrap();
        assert_eq!(stats.baseline, 0.0);
        assert!(stats.ratio.is_finite());
    }

    #[test]
    fn test_single_sample() {
        let stats = compute_stats(&Dataset::from_values(vec![5.0])).unwrap();
        assert_eq!(stats.baseline, 5.0);
        assert_eq!(stats.peak, 5.0);
        assert_eq!(stats.threshold, 50.0);
    }
}
