//! End-to-end mosaic request: geometry, cache, build
//!
//! Validates the request before any file is read, derives the tile size from the
//! target output size, resamples the source to grid resolution, builds the tile
//! cache and runs the builder.

use crate::cache::{CacheOptions, CacheReport, TileCache};
use crate::color::ColorClassBounds;
use crate::io::configuration::DEFAULT_SEED;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::decode_image;
use crate::io::progress::ProgressManager;
use crate::mosaic::builder::{Mosaic, MosaicBuilder};
use crate::mosaic::grid::MosaicGrid;
use image::RgbImage;
use std::fmt;
use std::path::{Path, PathBuf};

/// Everything needed to turn one source image into a mosaic
#[derive(Clone, Debug)]
pub struct MosaicRequest {
    /// Directory holding the candidate tile library
    pub candidate_directory: PathBuf,
    /// Mosaic width in tiles
    pub grid_width: u32,
    /// Mosaic height in tiles
    pub grid_height: u32,
    /// Desired output width in pixels
    pub target_width: u32,
    /// Desired output height in pixels
    pub target_height: u32,
    /// Whether one candidate may fill several cells
    pub allow_reuse: bool,
    /// Color class partition
    pub bounds: ColorClassBounds,
    /// Cache filtering parameters
    pub cache_options: CacheOptions,
    /// Seed for the cell visitation order
    pub seed: u64,
}

impl MosaicRequest {
    /// Request with default classification, filtering and seed
    pub fn new(
        candidate_directory: impl Into<PathBuf>,
        grid_width: u32,
        grid_height: u32,
        target_width: u32,
        target_height: u32,
    ) -> Self {
        Self {
            candidate_directory: candidate_directory.into(),
            grid_width,
            grid_height,
            target_width,
            target_height,
            allow_reuse: false,
            bounds: ColorClassBounds::default(),
            cache_options: CacheOptions::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Allow or forbid reusing candidates
    #[must_use]
    pub const fn with_reuse(mut self, allow_reuse: bool) -> Self {
        self.allow_reuse = allow_reuse;
        self
    }

    /// Use a different visitation seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use a different color class partition
    #[must_use]
    pub fn with_bounds(mut self, bounds: ColorClassBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Use a different spread percentile for the cache filter
    #[must_use]
    pub const fn with_spread_percentile(mut self, spread_percentile: f64) -> Self {
        self.cache_options.spread_percentile = spread_percentile;
        self
    }

    /// Tile pixel dimensions derived from the target size
    ///
    /// # Errors
    ///
    /// Returns an error if any grid or target dimension is zero
    pub fn tile_dimensions(&self) -> Result<(u32, u32)> {
        tile_dimensions(
            self.target_width,
            self.target_height,
            self.grid_width,
            self.grid_height,
        )
    }

    /// Check the request without touching the filesystem
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry or cache options are invalid
    pub fn validate(&self) -> Result<()> {
        self.tile_dimensions()?;
        self.cache_options.validate()
    }
}

/// Non-fatal conditions the caller should know about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MosaicWarning {
    /// No candidate survived filtering; every cell is a placeholder
    EmptyCache,
    /// Some library files could not be decoded and were left out
    SkippedCandidates {
        /// Number of files left out
        count: usize,
    },
    /// Some cells had no eligible candidate
    Placeholders {
        /// Number of placeholder cells
        count: usize,
    },
}

impl fmt::Display for MosaicWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCache => write!(f, "No candidate tiles available; mosaic is all placeholders"),
            Self::SkippedCandidates { count } => {
                write!(f, "{count} candidate files could not be decoded and were skipped")
            }
            Self::Placeholders { count } => {
                write!(f, "{count} cells had no eligible tile and were left black")
            }
        }
    }
}

/// Finished mosaic plus everything worth reporting about the run
#[derive(Debug)]
pub struct MosaicOutcome {
    /// The assembled mosaic
    pub mosaic: Mosaic,
    /// Non-fatal conditions encountered
    pub warnings: Vec<MosaicWarning>,
    /// Summary of cache construction
    pub cache_report: CacheReport,
}

/// Tile size from target size and grid size
///
/// Each dimension is `target / grid` rounded to the nearest integer (ties to
/// even) and clamped to at least one pixel.
///
/// # Errors
///
/// Returns an error if any argument is zero
pub fn tile_dimensions(
    target_width: u32,
    target_height: u32,
    grid_width: u32,
    grid_height: u32,
) -> Result<(u32, u32)> {
    for (parameter, value) in [
        ("grid_width", grid_width),
        ("grid_height", grid_height),
        ("target_width", target_width),
        ("target_height", target_height),
    ] {
        if value == 0 {
            return Err(invalid_parameter(parameter, &value, &"must be positive"));
        }
    }

    let per_tile = |target: u32, grid: u32| {
        let rounded = (f64::from(target) / f64::from(grid)).round_ties_even() as u32;
        rounded.max(1)
    };
    Ok((
        per_tile(target_width, grid_width),
        per_tile(target_height, grid_height),
    ))
}

/// Build a mosaic from an already decoded source image
///
/// # Errors
///
/// Returns an error if:
/// - The request is invalid (checked before any I/O)
/// - The candidate directory cannot be listed
/// - The source image is empty
pub fn build_mosaic(
    source: &RgbImage,
    request: &MosaicRequest,
    progress: Option<&ProgressManager>,
) -> Result<MosaicOutcome> {
    request.validate()?;
    let (tile_width, tile_height) = request.tile_dimensions()?;

    log::info!("Received mosaic request");
    log::debug!("Source image {}x{}", source.width(), source.height());
    log::debug!("Candidate directory {}", request.candidate_directory.display());
    log::debug!(
        "Grid {}x{} tiles, target {}x{} px, tile {tile_width}x{tile_height} px, reuse={}",
        request.grid_width,
        request.grid_height,
        request.target_width,
        request.target_height,
        request.allow_reuse
    );

    let grid = MosaicGrid::from_source(source, request.grid_width, request.grid_height)?;

    let mut cache = TileCache::build(
        &request.candidate_directory,
        tile_width,
        tile_height,
        request.bounds.clone(),
        request.cache_options,
        progress,
    )?;

    let mut builder = MosaicBuilder::new(request.seed, request.allow_reuse);
    let mosaic = builder.build(&grid, &mut cache, progress)?;

    let cache_report = cache.report().clone();
    let mut warnings = Vec::new();
    if cache.is_empty() {
        warnings.push(MosaicWarning::EmptyCache);
    }
    if !cache_report.skipped.is_empty() {
        warnings.push(MosaicWarning::SkippedCandidates {
            count: cache_report.skipped.len(),
        });
    }
    let placeholders = mosaic.placeholder_count();
    if placeholders > 0 && !cache.is_empty() {
        warnings.push(MosaicWarning::Placeholders {
            count: placeholders,
        });
    }

    Ok(MosaicOutcome {
        mosaic,
        warnings,
        cache_report,
    })
}

/// Decode the source image and build a mosaic from it
///
/// An unreadable source fails the whole request.
///
/// # Errors
///
/// Returns an error if the request is invalid, the source cannot be decoded,
/// or [`build_mosaic`] fails
pub fn build_mosaic_from_file(
    source_path: &Path,
    request: &MosaicRequest,
    progress: Option<&ProgressManager>,
) -> Result<MosaicOutcome> {
    request.validate()?;
    let source = decode_image(source_path)?;
    build_mosaic(&source, request, progress)
}
