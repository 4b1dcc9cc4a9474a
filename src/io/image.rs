//! Image file primitives: listing, decoding, resampling and encoding

use crate::io::configuration::{RECOGNIZED_SUFFIXES, RESIZE_FILTER};
use crate::io::error::{MosaicError, Result};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Check whether a filename ends with one of the recognized image suffixes
///
/// The comparison is case-sensitive and looks at the raw name, so `photo.JPG`
/// is not accepted.
pub fn has_recognized_suffix(file_name: &str) -> bool {
    RECOGNIZED_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}

/// List the image files directly inside a directory, sorted by path
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn list_image_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory).map_err(|e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| MosaicError::FileSystem {
                path: directory.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        let accepted = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(has_recognized_suffix);
        if accepted {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decode an image file into an 8-bit RGB buffer
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a decodable image
pub fn decode_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Resample a buffer to the given dimensions
pub fn resize_buffer(buffer: &RgbImage, width: u32, height: u32) -> RgbImage {
    if buffer.dimensions() == (width, height) {
        return buffer.clone();
    }
    image::imageops::resize(buffer, width, height, RESIZE_FILTER)
}

/// A buffer filled with a single color
pub fn solid_tile(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Write a buffer to disk, format chosen from the path's extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn encode_image(buffer: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    buffer.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write one solid-color JPEG tile for every combination of channel levels
///
/// Files are named `color{index}.jpeg` with the index running over red, then
/// green, then blue levels. Useful as a synthetic tile library for checking the
/// matcher against known colors.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a tile cannot be saved
pub fn write_solid_color_library(
    directory: &Path,
    levels: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(directory).map_err(|e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let mut written = Vec::with_capacity(levels.len().pow(3));
    for &r in levels {
        for &g in levels {
            for &b in levels {
                let path = directory.join(format!("color{}.jpeg", written.len()));
                log::debug!("Writing solid tile {:?} to {}", [r, g, b], path.display());
                encode_image(&solid_tile(width, height, [r, g, b]), &path)?;
                written.push(path);
            }
        }
    }
    Ok(written)
}
