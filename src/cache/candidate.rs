use crate::color::statistics::ChannelStatistics;
use crate::color::{Color, ColorClassBounds, ColorClassId};
use image::RgbImage;

/// One library image resized to the mosaic's tile dimensions
///
/// All fields are fixed at construction except the `used` flag, which only the
/// matcher flips while a no-reuse build is running.
#[derive(Clone, Debug)]
pub struct CandidateTile {
    source_id: String,
    pixels: RgbImage,
    mean_color: Color,
    spread: f64,
    class_id: ColorClassId,
    used: bool,
}

impl CandidateTile {
    /// Characterize a tile from its pixels
    pub fn from_pixels(
        source_id: impl Into<String>,
        pixels: RgbImage,
        bounds: &ColorClassBounds,
    ) -> Self {
        let stats = ChannelStatistics::from_pixels(&pixels);
        Self::with_statistics(source_id, pixels, stats.mean, stats.spread_magnitude(), bounds)
    }

    /// Build a tile from precomputed color statistics
    pub fn with_statistics(
        source_id: impl Into<String>,
        pixels: RgbImage,
        mean_color: Color,
        spread: f64,
        bounds: &ColorClassBounds,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            pixels,
            mean_color,
            spread,
            class_id: bounds.classify(mean_color),
            used: false,
        }
    }

    /// Filename (or other identifier) the tile came from
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Tile pixels at the cache's tile dimensions
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Mean color used as the tile's signature
    pub const fn mean_color(&self) -> Color {
        self.mean_color
    }

    /// Norm of the per-channel standard deviation vector
    pub const fn spread(&self) -> f64 {
        self.spread
    }

    /// Color class of the mean color
    pub const fn class_id(&self) -> ColorClassId {
        self.class_id
    }

    /// Whether a no-reuse build has already placed this tile
    pub const fn is_used(&self) -> bool {
        self.used
    }

    pub(crate) fn reclassify(&mut self, bounds: &ColorClassBounds) {
        self.class_id = bounds.classify(self.mean_color);
    }

    pub(crate) const fn mark_used(&mut self) {
        self.used = true;
    }

    pub(crate) const fn clear_used(&mut self) {
        self.used = false;
    }
}
