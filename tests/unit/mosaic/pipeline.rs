//! Tests for request validation, tile geometry and the end-to-end pipeline

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::MosaicError;
    use photomosaic::mosaic::pipeline::{build_mosaic_from_file, tile_dimensions};
    use photomosaic::mosaic::{MosaicRequest, MosaicWarning, build_mosaic};
    use tempfile::TempDir;

    // Tests tile size is the rounded ratio of target to grid size
    // Verified by truncating instead of rounding
    #[test]
    fn test_tile_dimensions_rounding() {
        assert_eq!(tile_dimensions(2000, 1500, 160, 120).unwrap(), (12, 12));
        assert_eq!(tile_dimensions(100, 100, 3, 3).unwrap(), (33, 33));
        assert_eq!(tile_dimensions(100, 50, 40, 20).unwrap(), (2, 2));
    }

    // Tests tiles never shrink below one pixel
    // Verified by removing the clamp
    #[test]
    fn test_tile_dimensions_clamped() {
        assert_eq!(tile_dimensions(10, 10, 100, 100).unwrap(), (1, 1));
    }

    // Tests zero geometry is a configuration error
    // Verified by dividing by zero grid sizes
    #[test]
    fn test_tile_dimensions_zero() {
        assert!(tile_dimensions(0, 10, 1, 1).is_err_and(|e| e.is_configuration_error()));
        assert!(tile_dimensions(10, 10, 1, 0).is_err_and(|e| e.is_configuration_error()));
    }

    // Tests validation happens before the candidate directory is read
    // Verified by building the cache before validating
    #[test]
    fn test_invalid_request_fails_fast() {
        let source = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let request = MosaicRequest::new("/nonexistent/tiles", 0, 2, 10, 10);
        let result = build_mosaic(&source, &request, None);
        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "grid_width",
                ..
            })
        ));
    }

    // Tests an empty library still yields a complete placeholder mosaic
    // Verified by returning an error for an empty cache
    #[test]
    fn test_empty_library_warning() {
        let tiles = TempDir::new().unwrap();
        let source = RgbImage::from_pixel(8, 8, Rgb([90, 30, 200]));
        let request = MosaicRequest::new(tiles.path(), 2, 2, 8, 8);

        let outcome = build_mosaic(&source, &request, None).unwrap();

        assert_eq!(outcome.warnings, vec![MosaicWarning::EmptyCache]);
        assert_eq!(outcome.mosaic.placeholder_count(), 4);
        assert_eq!(outcome.mosaic.image().dimensions(), (8, 8));
        assert_eq!(outcome.cache_report.retained, 0);
    }

    // Tests placeholders are reported once the library runs dry
    // Verified by suppressing the placeholder warning
    #[test]
    fn test_exhausted_library_warning() {
        let tiles = TempDir::new().unwrap();
        RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]))
            .save(tiles.path().join("red.png"))
            .unwrap();
        let source = RgbImage::from_pixel(8, 8, Rgb([250, 5, 5]));
        let request = MosaicRequest::new(tiles.path(), 2, 2, 8, 8);

        let outcome = build_mosaic(&source, &request, None).unwrap();

        assert_eq!(outcome.mosaic.placeholder_count(), 3);
        assert_eq!(
            outcome.warnings,
            vec![MosaicWarning::Placeholders { count: 3 }]
        );
    }

    // Tests an unreadable source fails the request
    // Verified by substituting a blank source on decode failure
    #[test]
    fn test_missing_source_is_error() {
        let tiles = TempDir::new().unwrap();
        let request = MosaicRequest::new(tiles.path(), 2, 2, 8, 8);
        let result = build_mosaic_from_file(&tiles.path().join("missing.png"), &request, None);
        assert!(matches!(result, Err(MosaicError::ImageLoad { .. })));
    }

    // Tests request builders and validation
    // Verified by ignoring the percentile in validate
    #[test]
    fn test_request_builders() {
        let request = MosaicRequest::new("tiles", 4, 3, 40, 30)
            .with_reuse(true)
            .with_seed(5)
            .with_spread_percentile(50.0);

        assert!(request.allow_reuse);
        assert_eq!(request.seed, 5);
        assert_eq!(request.tile_dimensions().unwrap(), (10, 10));
        assert!(request.validate().is_ok());
        assert!(request.with_spread_percentile(-1.0).validate().is_err());
    }

    // Tests warning messages mention the affected counts
    // Verified by dropping the count from the message
    #[test]
    fn test_warning_display() {
        let warning = MosaicWarning::SkippedCandidates { count: 2 };
        assert!(warning.to_string().starts_with('2'));
        assert!(MosaicWarning::Placeholders { count: 9 }.to_string().contains('9'));
    }
}
