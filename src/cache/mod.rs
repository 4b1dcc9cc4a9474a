//! Candidate tile library
//!
//! Characterizes library images, filters out visually busy ones and indexes the
//! survivors by color class.

/// A single characterized library image
pub mod candidate;
/// Bitset of occupied color classes
pub mod occupancy;
/// Cache construction from a directory or from prepared candidates
pub mod tile_cache;

pub use candidate::CandidateTile;
pub use occupancy::ColorClassOccupancy;
pub use tile_cache::{CacheOptions, CacheReport, TileCache};
