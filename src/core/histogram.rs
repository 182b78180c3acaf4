use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ReportError, ReportResult};

/// Upper bound on the number of bins of any histogram.
pub const MAX_BINS: usize = 10_000;

/// How the number of histogram bins is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinRule {
    /// Smaller of the Sturges and Freedman-Diaconis widths.
    #[default]
    Auto,
    /// Fixed number of equal-width bins, at most [`MAX_BINS`].
    Count(usize),
}

/// Equal-width bins over `[edges[0], edges[n]]`; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(first), Some(second)) => second - first,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bins `values` into equal-width buckets chosen by `rule`.
pub fn build_histogram(values: &[f64], rule: BinRule) -> ReportResult<Histogram> {
    if values.iter().any(|value| !value.is_finite()) {
        return Err(ReportError::InvalidData(
            "histogram values must be finite".to_owned(),
        ));
    }
    if values.is_empty() {
        return Ok(Histogram {
            edges: Vec::new(),
            counts: Vec::new(),
        });
    }

    let sorted = sorted_copy(values);
    let mut first = sorted[0];
    let mut last = sorted[sorted.len() - 1];
    if first == last {
        first -= 0.5;
        last += 0.5;
    }

    let bin_count = match rule {
        BinRule::Count(0) => {
            return Err(ReportError::InvalidData(
                "histogram bin count must be > 0".to_owned(),
            ));
        }
        BinRule::Count(count) if count > MAX_BINS => {
            return Err(ReportError::InvalidData(format!(
                "histogram bin count must be <= {MAX_BINS}"
            )));
        }
        BinRule::Count(count) => count,
        BinRule::Auto => {
            let count = auto_bin_count(&sorted);
            if count == MAX_BINS {
                warn!(values = sorted.len(), first, last, "auto bin count capped");
            }
            count
        }
    };

    let width = (last - first) / bin_count as f64;
    let edges = (0..=bin_count)
        .map(|index| first + width * index as f64)
        .collect::<Vec<_>>();

    let mut counts = vec![0usize; bin_count];
    for value in &sorted {
        let raw = ((value - first) / width).floor();
        let index = if raw < 0.0 {
            0
        } else {
            (raw as usize).min(bin_count - 1)
        };
        counts[index] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Bin count for already sorted, finite values, clamped to `1..=MAX_BINS`.
#[must_use]
pub fn auto_bin_count(sorted: &[f64]) -> usize {
    let n = sorted.len();
    if n < 2 {
        return 1;
    }
    let span = sorted[n - 1] - sorted[0];
    if span <= 0.0 {
        return 1;
    }

    let sturges_width = span / ((n as f64).log2() + 1.0);
    let iqr = percentile(sorted, 75.0) - percentile(sorted, 25.0);
    let fd_width = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);
    let width = if fd_width > 0.0 {
        fd_width.min(sturges_width)
    } else {
        sturges_width
    };

    ((span / width).ceil() as usize).clamp(1, MAX_BINS)
}

/// Linear-interpolated percentile of sorted values, `q` in `[0, 100]`.
#[must_use]
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        len => {
            let position = (q / 100.0).clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by_key(|value| OrderedFloat(*value));
    sorted
}
