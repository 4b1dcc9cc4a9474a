//! Coarse partition of RGB space into color classes
//!
//! Each channel is split into the same set of contiguous intervals and the three
//! per-channel interval indices are combined into a single mixed-radix class id.
//! Matching uses the class id to prune candidates before comparing distances.

use crate::io::configuration::{CHANNEL_MAX, DEFAULT_CLASS_COUNT, MAX_CLASS_COUNT};
use crate::io::error::{Result, invalid_parameter};
use std::fmt;

/// Mean color of a tile or target color of a grid cell, one `f64` per channel
pub type Color = [f64; 3];

/// Identifier of one bucket in the partition of RGB space
///
/// Encodes `(r, g, b)` interval indices as `n² · r + n · g + b` where `n` is the
/// number of intervals per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorClassId(usize);

impl ColorClassId {
    /// Combine per-channel interval indices into a class id
    pub const fn from_channels(channels: [usize; 3], class_count: usize) -> Self {
        Self(class_count * class_count * channels[0] + class_count * channels[1] + channels[2])
    }

    /// Wrap a raw class index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index, usable as a position in the occupancy vector
    pub const fn index(self) -> usize {
        self.0
    }

    /// Recover the per-channel interval indices
    pub const fn channels(self, class_count: usize) -> [usize; 3] {
        let square = class_count * class_count;
        [
            self.0 / square,
            (self.0 % square) / class_count,
            self.0 % class_count,
        ]
    }
}

impl fmt::Display for ColorClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.0)
    }
}

/// Strictly increasing thresholds splitting `[0, 255]` into intervals
///
/// `thresholds.len() - 1` intervals are defined; the first admits 0 and every
/// interval includes its upper threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorClassBounds {
    thresholds: Vec<f64>,
}

impl Default for ColorClassBounds {
    fn default() -> Self {
        Self::uniform_unchecked(DEFAULT_CLASS_COUNT)
    }
}

impl ColorClassBounds {
    /// Validate and wrap explicit thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two or more than [`MAX_CLASS_COUNT`] + 1
    /// thresholds are given, any threshold is not finite, or the thresholds are
    /// not strictly increasing
    pub fn new(thresholds: Vec<f64>) -> Result<Self> {
        if thresholds.len() < 2 {
            return Err(invalid_parameter(
                "bounds",
                &format!("{thresholds:?}"),
                &"at least two thresholds are required",
            ));
        }
        check_class_count(thresholds.len() - 1)?;
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(invalid_parameter(
                "bounds",
                &format!("{thresholds:?}"),
                &"thresholds must be finite",
            ));
        }
        if thresholds.windows(2).any(|pair| match pair {
            [lower, upper] => lower >= upper,
            _ => false,
        }) {
            return Err(invalid_parameter(
                "bounds",
                &format!("{thresholds:?}"),
                &"thresholds must be strictly increasing",
            ));
        }
        Ok(Self { thresholds })
    }

    /// Split the channel range into `class_count` equal-width intervals
    ///
    /// # Errors
    ///
    /// Returns an error if `class_count` is zero or above [`MAX_CLASS_COUNT`]
    pub fn uniform(class_count: usize) -> Result<Self> {
        check_class_count(class_count)?;
        Ok(Self::uniform_unchecked(class_count))
    }

    /// Split the channel range into intervals of `interval` times its width
    ///
    /// An interval of 0.2 yields five classes per channel.
    ///
    /// # Errors
    ///
    /// Returns an error unless `interval` lies in `(0, 1]` and yields at most
    /// [`MAX_CLASS_COUNT`] intervals
    pub fn from_interval(interval: f64) -> Result<Self> {
        if !(interval > 0.0 && interval <= 1.0) {
            return Err(invalid_parameter(
                "class_interval",
                &interval,
                &"must lie in (0, 1]",
            ));
        }
        let class_count = (1.0 / interval).round();
        if class_count > MAX_CLASS_COUNT as f64 {
            return Err(invalid_parameter(
                "class_interval",
                &interval,
                &format!("yields more than {MAX_CLASS_COUNT} intervals per channel"),
            ));
        }
        Self::uniform(class_count as usize)
    }

    fn uniform_unchecked(class_count: usize) -> Self {
        let step = CHANNEL_MAX / class_count as f64;
        let thresholds = (0..=class_count).map(|i| i as f64 * step).collect();
        Self { thresholds }
    }

    /// Number of intervals per channel
    pub fn class_count(&self) -> usize {
        self.thresholds.len() - 1
    }

    /// Number of distinct color classes (`class_count³`)
    pub fn total_classes(&self) -> usize {
        self.class_count().pow(3)
    }

    /// The threshold sequence
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Interval index of a single channel value
    ///
    /// Values below the range land in the first interval and values above it in
    /// the last.
    pub fn channel_class(&self, value: f64) -> usize {
        self.thresholds
            .iter()
            .skip(1)
            .position(|&upper| value <= upper)
            .unwrap_or(self.class_count() - 1)
    }

    /// Classify a color into its class id
    pub fn classify(&self, color: Color) -> ColorClassId {
        let channels = color.map(|value| self.channel_class(value));
        ColorClassId::from_channels(channels, self.class_count())
    }
}

fn check_class_count(class_count: usize) -> Result<()> {
    if class_count == 0 {
        return Err(invalid_parameter(
            "class_count",
            &class_count,
            &"at least one interval per channel is required",
        ));
    }
    if class_count > MAX_CLASS_COUNT {
        return Err(invalid_parameter(
            "class_count",
            &class_count,
            &format!("at most {MAX_CLASS_COUNT} intervals per channel are supported"),
        ));
    }
    Ok(())
}

/// Classify a color against the given bounds
pub fn classify(color: Color, bounds: &ColorClassBounds) -> ColorClassId {
    bounds.classify(color)
}
