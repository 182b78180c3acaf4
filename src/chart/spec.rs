use serde::{Deserialize, Serialize};

use crate::chart::Palette;
use crate::core::{BinRule, MAX_BINS, Viewport};
use crate::error::{ReportError, ReportResult};

/// Aggregation rule and mark type of one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Vertical bars counting rows per category, in first-appearance order.
    CategoryCount { field: String },
    /// Horizontal bars for the `limit` most frequent values, largest first.
    TopFrequency { field: String, limit: usize },
    /// Histogram of a numeric field, optionally with a density overlay.
    Distribution {
        field: String,
        bins: BinRule,
        density: bool,
    },
}

impl ChartKind {
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::CategoryCount { field }
            | Self::TopFrequency { field, .. }
            | Self::Distribution { field, .. } => field,
        }
    }
}

/// Everything needed to draw one chart besides the data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub viewport: Viewport,
    pub palette: Palette,
}

/// Token in the top-N chart title replaced by the configured `top_n`.
pub const TOP_N_PLACEHOLDER: &str = "{n}";

/// Field, labels and size of one configured chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub field: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
}

/// Configuration of the fixed three-chart set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSetConfig {
    #[serde(default = "default_category_chart")]
    pub category: ChartConfig,
    #[serde(default = "default_top_chart")]
    pub top: ChartConfig,
    #[serde(default = "default_distribution_chart")]
    pub distribution: ChartConfig,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub bins: BinRule,
    #[serde(default = "default_density")]
    pub density: bool,
}

impl Default for ChartSetConfig {
    fn default() -> Self {
        Self {
            category: default_category_chart(),
            top: default_top_chart(),
            distribution: default_distribution_chart(),
            top_n: default_top_n(),
            bins: BinRule::default(),
            density: default_density(),
        }
    }
}

impl ChartSetConfig {
    pub fn validate(&self) -> ReportResult<()> {
        if self.top_n == 0 {
            return Err(ReportError::InvalidData(
                "top_n must be > 0".to_owned(),
            ));
        }
        if self.bins == BinRule::Count(0) {
            return Err(ReportError::InvalidData(
                "histogram bin count must be > 0".to_owned(),
            ));
        }
        if matches!(self.bins, BinRule::Count(count) if count > MAX_BINS) {
            return Err(ReportError::InvalidData(format!(
                "histogram bin count must be <= {MAX_BINS}"
            )));
        }
        for chart in [&self.category, &self.top, &self.distribution] {
            if chart.field.is_empty() {
                return Err(ReportError::InvalidData(
                    "chart field must not be empty".to_owned(),
                ));
            }
            if !chart.viewport.is_valid() {
                return Err(ReportError::InvalidViewport {
                    width: chart.viewport.width,
                    height: chart.viewport.height,
                });
            }
        }
        Ok(())
    }

    /// The charts in render order: category count, top-N, distribution.
    #[must_use]
    pub fn specs(&self) -> Vec<ChartSpec> {
        vec![
            ChartSpec {
                kind: ChartKind::CategoryCount {
                    field: self.category.field.clone(),
                },
                title: self.category.title.clone(),
                x_label: self.category.x_label.clone(),
                y_label: self.category.y_label.clone(),
                viewport: self.category.viewport,
                palette: Palette::brand(),
            },
            ChartSpec {
                kind: ChartKind::TopFrequency {
                    field: self.top.field.clone(),
                    limit: self.top_n,
                },
                title: self.top.title.replace(TOP_N_PLACEHOLDER, &self.top_n.to_string()),
                x_label: self.top.x_label.clone(),
                y_label: self.top.y_label.clone(),
                viewport: self.top.viewport,
                palette: Palette::reds(),
            },
            ChartSpec {
                kind: ChartKind::Distribution {
                    field: self.distribution.field.clone(),
                    bins: self.bins,
                    density: self.density,
                },
                title: self.distribution.title.clone(),
                x_label: self.distribution.x_label.clone(),
                y_label: self.distribution.y_label.clone(),
                viewport: self.distribution.viewport,
                palette: Palette::accent(),
            },
        ]
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(640, 480)
}

fn default_top_n() -> usize {
    10
}

fn default_density() -> bool {
    true
}

fn default_category_chart() -> ChartConfig {
    ChartConfig {
        field: "type".to_owned(),
        title: "Count of Titles by Type".to_owned(),
        x_label: "Type".to_owned(),
        y_label: "Count".to_owned(),
        viewport: default_viewport(),
    }
}

fn default_top_chart() -> ChartConfig {
    ChartConfig {
        field: "country".to_owned(),
        title: "Top {n} Countries by Number of Titles".to_owned(),
        x_label: "Count".to_owned(),
        y_label: "Country".to_owned(),
        viewport: Viewport::new(1200, 600),
    }
}

fn default_distribution_chart() -> ChartConfig {
    ChartConfig {
        field: "release_year".to_owned(),
        title: "Distribution of Release Years".to_owned(),
        x_label: "Year".to_owned(),
        y_label: "Count".to_owned(),
        viewport: default_viewport(),
    }
}
