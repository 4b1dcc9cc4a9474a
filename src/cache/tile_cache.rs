//! Candidate pool construction and spread-based filtering
//!
//! Every recognized file in the library directory is decoded, resized to the
//! tile dimensions and characterized. Only the flattest candidates survive:
//! those whose spread magnitude is at or below the configured percentile of
//! all processed spreads.

use crate::cache::candidate::CandidateTile;
use crate::cache::occupancy::ColorClassOccupancy;
use crate::color::statistics::percentile;
use crate::color::{ColorClassBounds, ColorClassId};
use crate::io::configuration::DEFAULT_SPREAD_PERCENTILE;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{decode_image, list_image_files, resize_buffer};
use crate::io::progress::{ProgressManager, advance, complete, suspended};
use std::path::{Path, PathBuf};

/// Tunable parameters for cache construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheOptions {
    /// Candidates with spread at or below this percentile (0–100) are kept
    pub spread_percentile: f64,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            spread_percentile: DEFAULT_SPREAD_PERCENTILE,
        }
    }
}

impl CacheOptions {
    /// Check the options before any file is touched
    ///
    /// # Errors
    ///
    /// Returns an error if the percentile is outside `[0, 100]`
    pub fn validate(&self) -> Result<()> {
        if (0.0..=100.0).contains(&self.spread_percentile) {
            Ok(())
        } else {
            Err(invalid_parameter(
                "spread_percentile",
                &self.spread_percentile,
                &"must lie in [0, 100]",
            ))
        }
    }
}

/// A library file that could not be turned into a candidate
#[derive(Clone, Debug)]
pub struct SkippedCandidate {
    /// Path of the file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Summary of one cache construction
#[derive(Clone, Debug, Default)]
pub struct CacheReport {
    /// Recognized files found in the directory
    pub scanned: usize,
    /// Files that failed to decode
    pub skipped: Vec<SkippedCandidate>,
    /// Candidates characterized before filtering
    pub characterized: usize,
    /// Candidates kept after filtering
    pub retained: usize,
    /// Spread threshold used by the filter, if any candidate was characterized
    pub spread_threshold: Option<f64>,
}

/// Candidate pool plus the derived color-class occupancy
///
/// The cache owns every candidate's `used` flag; a builder takes it by
/// exclusive borrow for the length of one build.
#[derive(Clone, Debug)]
pub struct TileCache {
    candidates: Vec<CandidateTile>,
    occupancy: ColorClassOccupancy,
    bounds: ColorClassBounds,
    tile_width: u32,
    tile_height: u32,
    report: CacheReport,
}

impl TileCache {
    /// Characterize every recognized image in a directory and keep the flattest
    ///
    /// Files that fail to decode are logged and skipped; they are listed in
    /// [`TileCache::report`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile dimensions are zero or the options are invalid
    /// - The directory cannot be listed
    pub fn build(
        directory: &Path,
        tile_width: u32,
        tile_height: u32,
        bounds: ColorClassBounds,
        options: CacheOptions,
        progress: Option<&ProgressManager>,
    ) -> Result<Self> {
        validate_tile_dimensions(tile_width, tile_height)?;
        options.validate()?;

        let files = list_image_files(directory)?;
        suspended(progress, || {
            log::info!(
                "Caching {} candidate images from {}",
                files.len(),
                directory.display()
            );
        });

        let bar = progress.map(|pm| pm.stage("Caching tiles", files.len()));
        let mut candidates = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for path in &files {
            match decode_image(path) {
                Ok(decoded) => {
                    let pixels = resize_buffer(&decoded, tile_width, tile_height);
                    candidates.push(CandidateTile::from_pixels(
                        source_id_for(path),
                        pixels,
                        &bounds,
                    ));
                }
                Err(error) => {
                    suspended(progress, || log::warn!("Skipping candidate: {error}"));
                    skipped.push(SkippedCandidate {
                        path: path.clone(),
                        reason: error.to_string(),
                    });
                }
            }
            advance(bar.as_ref());
        }

        let mut cache =
            Self::from_candidates(candidates, tile_width, tile_height, bounds, options)?;
        cache.report.scanned = files.len();
        cache.report.skipped = skipped;

        complete(
            bar.as_ref(),
            format!("{} of {} kept", cache.len(), files.len()),
        );
        suspended(progress, || {
            log::info!(
                "Cached {} of {} candidates ({} skipped, {} color classes occupied)",
                cache.len(),
                files.len(),
                cache.report.skipped.len(),
                cache.occupancy.occupied_count()
            );
            if cache.is_empty() {
                log::warn!("No candidate tiles survived; every cell will be a placeholder");
            }
        });

        Ok(cache)
    }

    /// Filter characterized candidates by spread and index the survivors
    ///
    /// # Errors
    ///
    /// Returns an error if the tile dimensions are zero, the options are
    /// invalid, or a candidate's buffer does not match the tile dimensions
    pub fn from_candidates(
        candidates: Vec<CandidateTile>,
        tile_width: u32,
        tile_height: u32,
        bounds: ColorClassBounds,
        options: CacheOptions,
    ) -> Result<Self> {
        options.validate()?;
        let characterized = candidates.len();
        let (retained, threshold) = retain_least_busy(candidates, options.spread_percentile);
        if let Some(threshold) = threshold {
            log::debug!(
                "Spread threshold at percentile {}: {threshold:.3}",
                options.spread_percentile
            );
        }

        let mut cache = Self::from_retained(retained, tile_width, tile_height, bounds)?;
        cache.report.scanned = characterized;
        cache.report.characterized = characterized;
        cache.report.spread_threshold = threshold;
        Ok(cache)
    }

    /// Index candidates as given, without spread filtering
    ///
    /// Candidates are reclassified against `bounds` so the occupancy always
    /// agrees with the cache's own partition.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile dimensions are zero or a candidate's buffer
    /// does not match them
    pub fn from_retained(
        mut candidates: Vec<CandidateTile>,
        tile_width: u32,
        tile_height: u32,
        bounds: ColorClassBounds,
    ) -> Result<Self> {
        validate_tile_dimensions(tile_width, tile_height)?;
        for candidate in &mut candidates {
            let actual = candidate.pixels().dimensions();
            if actual != (tile_width, tile_height) {
                return Err(MosaicError::TileDimensionMismatch {
                    source_id: candidate.source_id().to_string(),
                    expected: (tile_width, tile_height),
                    actual,
                });
            }
            candidate.reclassify(&bounds);
        }

        let occupancy = ColorClassOccupancy::from_classes(
            bounds.total_classes(),
            candidates.iter().map(CandidateTile::class_id),
        );
        let report = CacheReport {
            scanned: candidates.len(),
            characterized: candidates.len(),
            retained: candidates.len(),
            ..CacheReport::default()
        };

        Ok(Self {
            candidates,
            occupancy,
            bounds,
            tile_width,
            tile_height,
            report,
        })
    }

    /// All retained candidates in cache order
    pub fn candidates(&self) -> &[CandidateTile] {
        &self.candidates
    }

    pub(crate) fn candidates_mut(&mut self) -> &mut [CandidateTile] {
        &mut self.candidates
    }

    /// Number of retained candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Test if no candidate survived
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Which color classes have at least one candidate
    pub const fn occupancy(&self) -> &ColorClassOccupancy {
        &self.occupancy
    }

    /// Test whether a class has at least one candidate
    pub fn is_class_occupied(&self, class: ColorClassId) -> bool {
        self.occupancy.is_occupied(class)
    }

    /// Partition used to classify candidates and targets
    pub const fn bounds(&self) -> &ColorClassBounds {
        &self.bounds
    }

    /// Tile dimensions as (width, height)
    pub const fn tile_dimensions(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Construction summary
    pub const fn report(&self) -> &CacheReport {
        &self.report
    }

    /// Number of candidates already placed by no-reuse builds
    pub fn used_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_used()).count()
    }

    /// Make every candidate available again
    pub fn reset_usage(&mut self) {
        for candidate in &mut self.candidates {
            candidate.clear_used();
        }
    }
}

/// Spread value at the given percentile of the candidates' spreads
pub fn spread_threshold(candidates: &[CandidateTile], spread_percentile: f64) -> Option<f64> {
    let spreads: Vec<f64> = candidates.iter().map(CandidateTile::spread).collect();
    percentile(&spreads, spread_percentile)
}

/// Keep candidates whose spread is at or below the percentile threshold
///
/// Order is preserved. Returns the survivors and the threshold, which is `None`
/// when there were no candidates.
pub fn retain_least_busy(
    candidates: Vec<CandidateTile>,
    spread_percentile: f64,
) -> (Vec<CandidateTile>, Option<f64>) {
    let Some(threshold) = spread_threshold(&candidates, spread_percentile) else {
        return (Vec::new(), None);
    };
    let retained = candidates
        .into_iter()
        .filter(|candidate| candidate.spread() <= threshold)
        .collect();
    (retained, Some(threshold))
}

fn validate_tile_dimensions(tile_width: u32, tile_height: u32) -> Result<()> {
    if tile_width == 0 || tile_height == 0 {
        return Err(invalid_parameter(
            "tile_dimensions",
            &format!("{tile_width}x{tile_height}"),
            &"tiles must be at least one pixel in each direction",
        ));
    }
    Ok(())
}

fn source_id_for(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
