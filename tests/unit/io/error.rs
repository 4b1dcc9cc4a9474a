//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::error::invalid_parameter;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = MosaicError::FileSystem {
            path: "/tmp/tiles".into(),
            operation: "read directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read directory"));
        assert!(message.contains("/tmp/tiles"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("grid_width", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("grid_width"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
        assert!(error.is_configuration_error());
        assert!(error.source().is_none());
    }

    // Tests dimension mismatch reports both sizes
    // Verified by printing expected dimensions twice
    #[test]
    fn test_tile_dimension_mismatch_error() {
        let error = MosaicError::TileDimensionMismatch {
            source_id: "cat.jpg".to_string(),
            expected: (12, 12),
            actual: (10, 8),
        };

        let message = error.to_string();
        assert!(message.contains("cat.jpg"));
        assert!(message.contains("10x8"));
        assert!(message.contains("12x12"));
        assert!(!error.is_configuration_error());
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = MosaicError::ImageExport {
            path: PathBuf::from("/restricted/out_mosaic.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/out_mosaic.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests source data errors carry no source
    // Verified by attaching a dummy source
    #[test]
    fn test_invalid_source_data_error() {
        let error = MosaicError::InvalidSourceData {
            reason: "source image has no pixels".to_string(),
        };
        assert!(error.to_string().contains("no pixels"));
        assert!(error.source().is_none());
    }

    // Tests conversions from library errors
    // Verified by mapping io errors to ImageLoad
    #[test]
    fn test_from_conversions() {
        let io_error = std::io::Error::other("disk");
        assert!(matches!(
            MosaicError::from(io_error),
            MosaicError::FileSystem { .. }
        ));

        let image_error = image::ImageError::IoError(std::io::Error::other("decode"));
        assert!(matches!(
            MosaicError::from(image_error),
            MosaicError::ImageLoad { .. }
        ));
    }
}
