pub mod panel;
pub mod render;
pub mod scale;

pub use panel::ChartPanel;
