/// Partition of RGB space into discrete color classes
pub mod classifier;
/// Mean color, spread magnitude and percentile helpers
pub mod statistics;

pub use classifier::{Color, ColorClassBounds, ColorClassId, classify};
