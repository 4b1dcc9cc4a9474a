//! Target colors of the mosaic's cells
//!
//! The source image is resampled so that one pixel corresponds to one tile cell;
//! the resulting colors are what the matcher tries to approximate.

use crate::color::Color;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::resize_buffer;
use image::RgbImage;
use ndarray::Array2;

/// Read-only 2D array of target colors, indexed by (row, col)
#[derive(Clone, Debug, PartialEq)]
pub struct MosaicGrid {
    colors: Array2<Color>,
}

impl MosaicGrid {
    /// Wrap a prepared color array
    pub const fn from_colors(colors: Array2<Color>) -> Self {
        Self { colors }
    }

    /// Every cell set to the same color
    pub fn uniform(rows: usize, cols: usize, color: Color) -> Self {
        Self {
            colors: Array2::from_elem((rows, cols), color),
        }
    }

    /// Treat each pixel of an image as one cell
    pub fn from_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let colors = Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
            image
                .get_pixel_checked(col as u32, row as u32)
                .map_or([0.0; 3], |pixel| pixel.0.map(f64::from))
        });
        Self { colors }
    }

    /// Resample a source image down to `grid_width` x `grid_height` cells
    ///
    /// # Errors
    ///
    /// Returns an error if either grid dimension is zero or the source image is
    /// empty
    pub fn from_source(source: &RgbImage, grid_width: u32, grid_height: u32) -> Result<Self> {
        if grid_width == 0 || grid_height == 0 {
            return Err(invalid_parameter(
                "grid_dimensions",
                &format!("{grid_width}x{grid_height}"),
                &"the grid needs at least one tile in each direction",
            ));
        }
        if source.width() == 0 || source.height() == 0 {
            return Err(MosaicError::InvalidSourceData {
                reason: "source image has no pixels".to_string(),
            });
        }

        let resized = resize_buffer(source, grid_width, grid_height);
        log::debug!(
            "Resized source {}x{} to grid {}x{}",
            source.width(),
            source.height(),
            resized.width(),
            resized.height()
        );
        Ok(Self::from_image(&resized))
    }

    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.colors.nrows()
    }

    /// Number of cell columns
    pub fn cols(&self) -> usize {
        self.colors.ncols()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.colors.len()
    }

    /// Target color of one cell
    pub fn color_at(&self, row: usize, col: usize) -> Option<Color> {
        self.colors.get((row, col)).copied()
    }

    /// All cell coordinates in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}
