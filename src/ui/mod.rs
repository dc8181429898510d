pub mod stats_panel;
pub mod toolbar;
