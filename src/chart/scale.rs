//! Index→x and value→y affine mapping, plus nice-number axis ticks.
//!
//! Recomputed whenever the dataset, statistics, or viewport change, never
//! per frame.

use egui::{Pos2, Rect, pos2};

use crate::constants::chart::{
    DOMAIN_PADDING, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, TARGET_TICK_COUNT,
};
use crate::data::{Dataset, GlareStats};

/// Chart margins in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: MARGIN_LEFT,
            right: MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: MARGIN_BOTTOM,
        }
    }
}

/// Pixel mapping for one dataset in one viewport
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScale {
    n: usize,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    y_min: f64,
    y_max: f64,
    ticks: Vec<f64>,
}

impl ChartScale {
    /// Derive the mapping for `dataset` drawn inside `rect`.
    ///
    /// The y-domain always covers baseline, data extremes and the alert
    /// threshold; a degenerate single-point domain is widened by ±1, and the
    /// final domain is padded 8% on both ends.
    pub fn compute(dataset: &Dataset, stats: &GlareStats, rect: Rect, margins: Margins) -> Self {
        let (data_min, data_max) = dataset.min_max().unwrap_or((stats.baseline, stats.peak));

        let mut y_min = stats.baseline.min(data_min);
        let mut y_max = stats.peak.max(data_max).max(stats.threshold);
        if y_min == y_max {
            y_min -= 1.0;
            y_max += 1.0;
        }
        let pad = (y_max - y_min) * DOMAIN_PADDING;
        y_min -= pad;
        y_max += pad;

        Self {
            n: dataset.len(),
            left: rect.left() + margins.left,
            right: (rect.right() - margins.right).max(rect.left() + margins.left + 1.0),
            top: rect.top() + margins.top,
            bottom: (rect.bottom() - margins.bottom).max(rect.top() + margins.top + 1.0),
            y_min,
            y_max,
            ticks: nice_ticks(y_min, y_max, TARGET_TICK_COUNT),
        }
    }

    /// Inner plot bounds (the area between the margins)
    pub fn plot_rect(&self) -> Rect {
        Rect::from_min_max(pos2(self.left, self.top), pos2(self.right, self.bottom))
    }

    pub fn inner_width(&self) -> f32 {
        self.right - self.left
    }

    /// Padded y-domain, `(min, max)`
    pub fn y_domain(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Pixel x of a sample index. A single-sample dataset sits at the left
    /// edge.
    pub fn x_of(&self, index: usize) -> f32 {
        if self.n <= 1 {
            return self.left;
        }
        self.left + index as f32 / (self.n - 1) as f32 * self.inner_width()
    }

    /// Pixel y of a reading
    pub fn y_of(&self, value: f64) -> f32 {
        let t = ((value - self.y_min) / (self.y_max - self.y_min)) as f32;
        self.bottom - t * (self.bottom - self.top)
    }

    /// Pixel position of a sample
    pub fn point(&self, index: usize, value: f64) -> Pos2 {
        pos2(self.x_of(index), self.y_of(value))
    }

    /// Map a pointer x back to the nearest sample index.
    ///
    /// Clamped: positions at or beyond the right edge map to n-1, at or
    /// before the left edge to 0. None iff the dataset is empty.
    pub fn index_at(&self, x: f32) -> Option<usize> {
        if self.n == 0 {
            return None;
        }
        let t = ((x - self.left) / self.inner_width().max(1.0)).clamp(0.0, 1.0);
        Some((t * (self.n - 1) as f32).round() as usize)
    }
}

/// Axis tick values snapped to a human-friendly step.
///
/// The step is the smallest of {1, 2, 5, 10} × 10^k that is at least
/// `span / target`; ticks run from the first multiple ≥ `min` through `max`,
/// inclusive within a small epsilon.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if !(span > 0.0) || target == 0 {
        return Vec::new();
    }

    let raw_step = span / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let snapped = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|&s| s >= normalized)
        .unwrap_or(10.0);
    let step = snapped * magnitude;

    let first = (min / step).ceil();
    let eps = step * 1e-6;
    let mut ticks = Vec::new();
    let mut k = 0u32;
    loop {
        let v = (first + k as f64) * step;
        if v > max + eps {
            break;
        }
        ticks.push(v);
        k += 1;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::compute_stats;
    use egui::vec2;

    fn scale_for(values: Vec<f64>, w: f32, h: f32) -> ChartScale {
        let ds = Dataset::from_values(values);
        let stats = compute_stats(&ds).unwrap();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(w, h));
        ChartScale::compute(&ds, &stats, rect, Margins::default())
    }

    #[test]
    fn test_y_domain_covers_threshold() {
        // Threshold (10 × baseline) exceeds every reading here, so the
        // domain must stretch to cover it.
        let scale = scale_for(vec![2.0, 2.5, 3.0], 800.0, 400.0);
        let (lo, hi) = scale.y_domain();
        assert!(lo <= 2.0);
        assert!(hi >= 20.0);
    }

    #[test]
    fn test_y_domain_padding() {
        let scale = scale_for(vec![0.0, 100.0], 800.0, 400.0);
        let (lo, hi) = scale.y_domain();
        // Baseline 0, peak 100, threshold 0: raw domain [0, 100] padded 8%
        assert!((lo - -8.0).abs() < 1e-9);
        assert!((hi - 108.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_domain_is_widened() {
        let scale = scale_for(vec![5.0, 5.0, 5.0], 800.0, 400.0);
        let (lo, hi) = scale.y_domain();
        // Constant 5s: baseline = peak = 5, threshold 50 stretches the top,
        // so this domain is not degenerate. Force one with zeroes:
        assert!(hi > lo);
        // All-zero capture degenerates to a single point: widened to
        // [-1, 1], then padded 8% of the widened span on each end.
        let zscale = scale_for(vec![0.0, 0.0], 800.0, 400.0);
        let (zlo, zhi) = zscale.y_domain();
        assert!((zlo - -1.16).abs() < 1e-9);
        assert!((zhi - 1.16).abs() < 1e-9);
    }

    #[test]
    fn test_x_mapping_endpoints() {
        let scale = scale_for((0..100).map(|i| i as f64).collect(), 800.0, 400.0);
        let rect = scale.plot_rect();
        assert_eq!(scale.x_of(0), rect.left());
        assert!((scale.x_of(99) - rect.right()).abs() < 1e-3);
    }

    #[test]
    fn test_single_sample_sits_left() {
        let scale = scale_for(vec![7.0], 800.0, 400.0);
        assert_eq!(scale.x_of(0), scale.plot_rect().left());
    }

    #[test]
    fn test_y_mapping_is_inverted() {
        let scale = scale_for(vec![0.0, 10.0], 800.0, 400.0);
        let (lo, hi) = scale.y_domain();
        assert!(scale.y_of(lo) > scale.y_of(hi)); // bigger values sit higher
    }

    #[test]
    fn test_hover_mapping_clamps_to_edges() {
        let scale = scale_for((0..50).map(|i| i as f64).collect(), 800.0, 400.0);
        let rect = scale.plot_rect();
        assert_eq!(scale.index_at(rect.left() - 100.0), Some(0));
        assert_eq!(scale.index_at(rect.left()), Some(0));
        assert_eq!(scale.index_at(rect.right()), Some(49));
        assert_eq!(scale.index_at(rect.right() + 0.4), Some(49));
        assert_eq!(scale.index_at(rect.right() + 100.0), Some(49));
    }

    #[test]
    fn test_hover_mapping_is_idempotent() {
        let scale = scale_for((0..200).map(|i| (i % 13) as f64).collect(), 800.0, 400.0);
        for idx in [0usize, 1, 57, 123, 199] {
            let x = scale.x_of(idx);
            assert_eq!(scale.index_at(x), Some(idx));
        }
    }

    #[test]
    fn test_empty_dataset_has_no_hover_index() {
        let ds = Dataset::default();
        let stats = GlareStats {
            baseline: 0.0,
            peak: 1.0,
            ratio: 1.0,
            threshold: 0.0,
        };
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 400.0));
        let scale = ChartScale::compute(&ds, &stats, rect, Margins::default());
        assert_eq!(scale.index_at(400.0), None);
    }

    #[test]
    fn test_nice_ticks_step_shape() {
        for (min, max) in [(0.0, 1.0), (-8.0, 108.0), (3.7, 4.1), (0.0, 12345.0)] {
            let ticks = nice_ticks(min, max, 6);
            assert!(ticks.len() >= 2, "range {min}..{max}");

            // Monotonically increasing, constant step
            let step = ticks[1] - ticks[0];
            for w in ticks.windows(2) {
                assert!(w[1] > w[0]);
                assert!((w[1] - w[0] - step).abs() < step * 1e-6);
            }

            // Step is {1,2,5,10} × 10^k
            let mag = 10f64.powf(step.log10().floor());
            let norm = step / mag;
            assert!(
                [1.0, 2.0, 5.0, 10.0].iter().any(|s| (norm - s).abs() < 1e-9),
                "step {step} for range {min}..{max}"
            );

            // All ticks inside the domain (within epsilon)
            assert!(ticks[0] >= min - step * 1e-6);
            assert!(*ticks.last().unwrap() <= max + step * 1e-6);
        }
    }

    #[test]
    fn test_nice_ticks_degenerate_range() {
        assert!(nice_ticks(5.0, 5.0, 6).is_empty());
        assert!(nice_ticks(7.0, 3.0, 6).is_empty());
    }
}
