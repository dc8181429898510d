//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application, making them easier to maintain and configure.

/// Statistics defaults
pub mod stats {
    /// Percentile used for the robust baseline (ambient light level)
    pub const BASELINE_PERCENTILE: f64 = 0.05;

    /// Percentile used for the robust peak (glare events)
    pub const PEAK_PERCENTILE: f64 = 0.95;

    /// Alert threshold as a multiple of the baseline
    pub const THRESHOLD_MULTIPLIER: f64 = 10.0;

    /// Guard against division by a zero or near-zero baseline
    pub const BASELINE_EPSILON: f64 = 1e-9;
}

/// Chart geometry and axis defaults
pub mod chart {
    /// Left margin, leaves room for tick labels
    pub const MARGIN_LEFT: f32 = 56.0;

    pub const MARGIN_RIGHT: f32 = 16.0;

    pub const MARGIN_TOP: f32 = 14.0;

    pub const MARGIN_BOTTOM: f32 = 28.0;

    /// Target number of y-axis ticks before nice-number snapping
    pub const TARGET_TICK_COUNT: usize = 6;

    /// Fractional padding applied to both ends of the y-domain
    pub const DOMAIN_PADDING: f64 = 0.08;

    /// Decimation treats any plot narrower than this as this wide
    pub const MIN_DRAW_WIDTH: f64 = 50.0;

    /// Decimation never plots more samples than this per pass
    pub const MAX_DRAW_WIDTH: f64 = 1600.0;

    /// Minimum chart height in logical pixels
    pub const MIN_CHART_HEIGHT: f32 = 240.0;
}

/// Ambient beam layer defaults
pub mod ambient {
    /// Cap on live beams in the pool
    pub const MAX_BEAMS: usize = 12;

    /// Number of faint background specks
    pub const SPECK_COUNT: usize = 10;

    /// Spawn interval bounds in seconds
    pub const SPAWN_INTERVAL_MIN: f32 = 0.4;
    pub const SPAWN_INTERVAL_MAX: f32 = 0.7;

    /// Per-second fade applied to each beam
    pub const BEAM_FADE_RATE: f32 = 0.24;
}

/// UI layout defaults
pub mod layout {
    /// Bottom panel (statistics readout) default height
    pub const STATS_PANEL_HEIGHT: f32 = 84.0;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "glare-scope.json";
}
