//! Mosaic constants and runtime configuration defaults

use image::imageops::FilterType;

/// Largest value a color channel can take
pub const CHANNEL_MAX: f64 = 255.0;

// Color classification
/// Default number of intervals each channel is split into
pub const DEFAULT_CLASS_COUNT: usize = 5;
/// Default class interval as a fraction of the channel range
pub const DEFAULT_CLASS_INTERVAL: f64 = 0.2;
/// Most intervals a channel can be split into; one per 8-bit channel value
pub const MAX_CLASS_COUNT: usize = 256;

// Keeps the flattest tiles; busier tiles approximate a single color poorly
/// Percentile of spread magnitudes at or below which candidates are retained
pub const DEFAULT_SPREAD_PERCENTILE: f64 = 30.0;

/// Filename suffixes accepted as candidate tiles (matched case as found)
pub const RECOGNIZED_SUFFIXES: [&str; 3] = ["jpg", "jpeg", "png"];

/// Resampling filter used for every resize
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

// Mosaic geometry defaults
/// Default mosaic width in tiles
pub const DEFAULT_GRID_WIDTH: u32 = 160;
/// Default mosaic height in tiles
pub const DEFAULT_GRID_HEIGHT: u32 = 120;
/// Default target mosaic width in pixels
pub const DEFAULT_TARGET_WIDTH: u32 = 2000;
/// Default target mosaic height in pixels
pub const DEFAULT_TARGET_HEIGHT: u32 = 1500;

/// Fixed seed for reproducible cell visitation order
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";

// Solid-color library generation
/// Channel levels combined into the default solid-color library
pub const DEFAULT_PALETTE_LEVELS: [u8; 5] = [0, 64, 128, 192, 255];
/// Default edge length of generated solid-color tiles
pub const DEFAULT_PALETTE_TILE_SIZE: u32 = 32;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
