//! Tests for candidate tile characterization

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::cache::CandidateTile;
    use photomosaic::color::ColorClassBounds;

    // Tests statistics and class are derived from pixels
    // Verified by classifying the first pixel instead of the mean
    #[test]
    fn test_from_pixels_characterizes_tile() {
        let bounds = ColorClassBounds::default();
        let mut pixels = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        pixels.put_pixel(1, 0, Rgb([200, 0, 0]));

        let tile = CandidateTile::from_pixels("dark.png", pixels, &bounds);

        assert_eq!(tile.source_id(), "dark.png");
        assert_eq!(tile.mean_color(), [100.0, 0.0, 0.0]);
        assert!((tile.spread() - 100.0).abs() < 1e-9);
        assert_eq!(tile.class_id(), bounds.classify([100.0, 0.0, 0.0]));
        assert_eq!(tile.pixels().dimensions(), (2, 1));
        assert!(!tile.is_used());
    }

    // Tests precomputed statistics are kept as given
    // Verified by recomputing the spread from pixels
    #[test]
    fn test_with_statistics_keeps_values() {
        let bounds = ColorClassBounds::default();
        let pixels = RgbImage::from_pixel(3, 3, Rgb([10, 20, 30]));

        let tile = CandidateTile::with_statistics("synthetic", pixels, [240.0, 240.0, 10.0], 7.5, &bounds);

        assert_eq!(tile.mean_color(), [240.0, 240.0, 10.0]);
        assert_eq!(tile.spread(), 7.5);
        assert_eq!(tile.class_id().index(), 4 * 25 + 4 * 5);
    }
}
