//! Photomosaic generation by color-class tile matching
//!
//! A library of candidate photos is characterized by mean color and color
//! spread, the flattest candidates are bucketed into coarse color classes, and
//! each cell of the downsampled source image is filled with the nearest unused
//! candidate, visiting cells in random order.

#![forbid(unsafe_code)]

/// Candidate tile characterization, filtering and indexing
pub mod cache;
/// Color classification and color statistics
pub mod color;
/// Input/output operations, configuration and error handling
pub mod io;
/// Mosaic grid, matching and assembly
pub mod mosaic;

pub use io::error::{MosaicError, Result};
pub use mosaic::pipeline::{MosaicOutcome, MosaicRequest, MosaicWarning, build_mosaic};
