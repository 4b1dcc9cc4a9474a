//! Cell-by-cell mosaic assembly in randomized order
//!
//! Cells are visited in a uniformly shuffled order so that color classes which
//! run out of free candidates do not always degrade the same region of the
//! image. Each visited cell is classified, matched against the cache and its
//! tile copied into the output buffer.

use crate::cache::TileCache;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::solid_tile;
use crate::io::progress::{ProgressManager, advance, complete, suspended};
use crate::mosaic::grid::MosaicGrid;
use crate::mosaic::matcher::{MatchOutcome, match_tile};
use image::RgbImage;
use image::imageops::replace;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Color written into cells that have no eligible candidate
pub const PLACEHOLDER_COLOR: [u8; 3] = [0, 0, 0];

/// The tile chosen for one cell, in the order cells were visited
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellAssignment {
    /// Cell row
    pub row: usize,
    /// Cell column
    pub col: usize,
    /// Candidate or placeholder written to the cell
    pub outcome: MatchOutcome,
}

/// Assembled output of one build
#[derive(Clone, Debug)]
pub struct Mosaic {
    image: RgbImage,
    assignments: Vec<CellAssignment>,
    outcomes: Vec<MatchOutcome>,
    grid_dimensions: (usize, usize),
    tile_dimensions: (u32, u32),
}

impl Mosaic {
    /// Output pixels
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Take ownership of the output pixels
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Per-cell choices in visitation order
    pub fn assignments(&self) -> &[CellAssignment] {
        &self.assignments
    }

    /// Grid dimensions as (rows, cols)
    pub const fn grid_dimensions(&self) -> (usize, usize) {
        self.grid_dimensions
    }

    /// Tile dimensions as (width, height)
    pub const fn tile_dimensions(&self) -> (u32, u32) {
        self.tile_dimensions
    }

    /// The outcome recorded for a cell, `None` outside the grid
    pub fn outcome_at(&self, row: usize, col: usize) -> Option<MatchOutcome> {
        let (rows, cols) = self.grid_dimensions;
        if row >= rows || col >= cols {
            return None;
        }
        self.outcomes.get(row * cols + col).copied()
    }

    /// Number of cells that received a black placeholder
    pub fn placeholder_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.outcome.is_placeholder())
            .count()
    }

    /// Number of cells filled from outside their own color class
    pub fn waived_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| matches!(a.outcome, MatchOutcome::Tile(s) if s.class_waived))
            .count()
    }
}

/// Produce every (row, col) of a grid in uniformly random order
pub fn visitation_order<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Vec<(usize, usize)> {
    let mut cells: Vec<(usize, usize)> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .collect();
    cells.shuffle(rng);
    cells
}

/// Seeded mosaic assembler
pub struct MosaicBuilder {
    rng: StdRng,
    allow_reuse: bool,
}

impl MosaicBuilder {
    /// Create a builder with a deterministic visitation order
    pub fn new(seed: u64, allow_reuse: bool) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            allow_reuse,
        }
    }

    /// Whether a candidate may fill more than one cell
    pub const fn allow_reuse(&self) -> bool {
        self.allow_reuse
    }

    /// Fill every grid cell from the cache
    ///
    /// Tile dimensions are taken from the cache. With reuse disabled, every
    /// selected candidate is marked used in the cache and stays so after the
    /// build; call [`TileCache::reset_usage`] to start over.
    ///
    /// # Errors
    ///
    /// Returns an error if the output dimensions overflow `u32`
    pub fn build(
        &mut self,
        grid: &MosaicGrid,
        cache: &mut TileCache,
        progress: Option<&ProgressManager>,
    ) -> Result<Mosaic> {
        let (tile_width, tile_height) = cache.tile_dimensions();
        let (rows, cols) = (grid.rows(), grid.cols());
        let width = output_extent(cols, tile_width, "grid_width")?;
        let height = output_extent(rows, tile_height, "grid_height")?;
        suspended(progress, || {
            log::debug!("Final mosaic size {width}x{height}, tile size {tile_width}x{tile_height}");
        });

        let mut image = RgbImage::new(width, height);
        let placeholder = solid_tile(tile_width, tile_height, PLACEHOLDER_COLOR);
        let order = visitation_order(rows, cols, &mut self.rng);
        let mut assignments = Vec::with_capacity(order.len());
        let mut outcomes = vec![MatchOutcome::Placeholder; order.len()];

        let bar = progress.map(|pm| pm.stage("Building mosaic", order.len()));
        for (row, col) in order {
            let target = grid
                .color_at(row, col)
                .ok_or_else(|| MosaicError::InvalidSourceData {
                    reason: format!("grid has no cell at ({row}, {col})"),
                })?;
            let target_class = cache.bounds().classify(target);
            let outcome = match_tile(cache, target, target_class, self.allow_reuse);

            let tile = outcome
                .candidate_index()
                .and_then(|index| cache.candidates().get(index))
                .map_or(&placeholder, |candidate| candidate.pixels());
            replace(
                &mut image,
                tile,
                i64::from(tile_width) * col as i64,
                i64::from(tile_height) * row as i64,
            );

            if let Some(slot) = outcomes.get_mut(row * cols + col) {
                *slot = outcome;
            }
            assignments.push(CellAssignment { row, col, outcome });
            advance(bar.as_ref());
        }

        let mosaic = Mosaic {
            image,
            assignments,
            outcomes,
            grid_dimensions: (rows, cols),
            tile_dimensions: (tile_width, tile_height),
        };
        complete(
            bar.as_ref(),
            format!("{} placeholders", mosaic.placeholder_count()),
        );
        suspended(progress, || {
            log::info!(
                "Built {rows}x{cols} mosaic ({} cells outside their class, {} placeholders)",
                mosaic.waived_count(),
                mosaic.placeholder_count()
            );
        });
        Ok(mosaic)
    }
}

fn output_extent(cells: usize, tile_extent: u32, parameter: &'static str) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(tile_extent))
        .ok_or_else(|| invalid_parameter(parameter, &cells, &"output image would exceed u32 pixels"))
}
