//! Mosaic assembly
//!
//! This module contains:
//! - The grid of target colors derived from the source image
//! - The per-cell matching rule
//! - The randomized cell-by-cell builder
//! - The end-to-end request pipeline

/// Randomized cell-by-cell assembly
pub mod builder;
/// Target colors per cell
pub mod grid;
/// Candidate eligibility and nearest-color selection
pub mod matcher;
/// Request validation, geometry and orchestration
pub mod pipeline;

pub use builder::{Mosaic, MosaicBuilder};
pub use grid::MosaicGrid;
pub use pipeline::{MosaicOutcome, MosaicRequest, MosaicWarning, build_mosaic};
