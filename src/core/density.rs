use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Number of evaluation points along the density curve.
pub const DENSITY_GRID_SIZE: usize = 200;

/// One evaluated point of a smoothed density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
}

/// Gaussian kernel density estimate with Scott's bandwidth rule.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Returns `None` for fewer than two samples or zero variance, where no
    /// meaningful bandwidth exists.
    #[must_use]
    pub fn fit(samples: &[f64]) -> Option<Self> {
        let n = samples.len();
        if n < 2 {
            return None;
        }

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        let std_dev = variance.sqrt();
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return None;
        }

        let scott_factor = (n as f64).powf(-1.0 / 5.0);
        Some(Self {
            samples: samples.to_vec(),
            bandwidth: scott_factor * std_dev,
        })
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.samples.len() as f64 * self.bandwidth * (2.0 * PI).sqrt());
        let sum = self
            .samples
            .iter()
            .map(|sample| {
                let z = (x - sample) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>();
        norm * sum
    }

    /// Evaluates the density on `points` evenly spaced values over `[start, end]`,
    /// multiplied by `scale`.
    #[must_use]
    pub fn curve(&self, start: f64, end: f64, points: usize, scale: f64) -> Vec<DensityPoint> {
        if points < 2 || !start.is_finite() || !end.is_finite() {
            return Vec::new();
        }

        let step = (end - start) / (points - 1) as f64;
        (0..points)
            .map(|index| {
                let x = start + step * index as f64;
                DensityPoint {
                    x,
                    y: self.evaluate(x) * scale,
                }
            })
            .collect()
    }
}

/// Density curve over the sample range, scaled to histogram count units.
///
/// `bin_width` is the width of the histogram bins the curve overlays.
#[must_use]
pub fn count_scaled_density(samples: &[f64], bin_width: f64) -> Option<Vec<DensityPoint>> {
    let kde = GaussianKde::fit(samples)?;
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(*value), hi.max(*value))
        });
    let scale = samples.len() as f64 * bin_width;
    Some(kde.curve(min, max, DENSITY_GRID_SIZE, scale))
}
