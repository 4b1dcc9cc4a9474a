//! Color signatures of pixel buffers
//!
//! A tile is summarised by its mean color and by the Euclidean norm of its
//! per-channel standard deviations (its spread magnitude).

use crate::color::classifier::Color;
use image::RgbImage;
use num_traits::Float;

/// Mean and population standard deviation of each channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelStatistics {
    /// Per-channel mean
    pub mean: Color,
    /// Per-channel population standard deviation
    pub std_dev: Color,
}

impl ChannelStatistics {
    /// Compute channel statistics over every pixel of the buffer
    ///
    /// An empty buffer yields zeros.
    pub fn from_pixels(pixels: &RgbImage) -> Self {
        let count = u64::from(pixels.width()) * u64::from(pixels.height());
        if count == 0 {
            return Self {
                mean: [0.0; 3],
                std_dev: [0.0; 3],
            };
        }

        let n = count as f64;

        let mut sum = [0.0_f64; 3];
        for pixel in pixels.pixels() {
            for (s, &value) in sum.iter_mut().zip(pixel.0.iter()) {
                *s += f64::from(value);
            }
        }
        let mean = sum.map(|s| s / n);

        // Two passes keep flat tiles at exactly zero spread
        let mut squared_deviation = [0.0_f64; 3];
        for pixel in pixels.pixels() {
            for ((sq, &value), &m) in squared_deviation
                .iter_mut()
                .zip(pixel.0.iter())
                .zip(mean.iter())
            {
                let d = f64::from(value) - m;
                *sq = d.mul_add(d, *sq);
            }
        }
        let std_dev = squared_deviation.map(|sq| (sq / n).sqrt());

        Self { mean, std_dev }
    }

    /// Euclidean norm of the standard deviation vector
    pub fn spread_magnitude(&self) -> f64 {
        color_distance(self.std_dev, [0.0; 3])
    }
}

/// Euclidean distance between two colors
pub fn color_distance(a: Color, b: Color) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Percentile of a sample using linear interpolation between closest ranks
///
/// `percentile` is on the 0–100 scale. Returns `None` for an empty sample or a
/// percentile outside that range.
pub fn percentile<T: Float>(values: &[T], percentile: T) -> Option<T> {
    let hundred = T::from(100.0)?;
    if values.is_empty() || percentile < T::zero() || percentile > hundred {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = percentile / hundred * T::from(sorted.len() - 1)?;
    let lower_index = rank.floor().to_usize()?;
    let upper_index = rank.ceil().to_usize()?;
    let lower = *sorted.get(lower_index)?;
    let upper = *sorted.get(upper_index)?;
    let fraction = rank - rank.floor();

    Some(lower + (upper - lower) * fraction)
}
