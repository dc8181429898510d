pub mod loader;
pub mod stats;
pub mod worker;

// Re-export key types for convenience
pub use loader::{Dataset, FileSource, StaticSource, TextSource, load};
pub use stats::{GlareStats, compute_stats};
pub use worker::BackgroundLoader;
