use serde::{Deserialize, Serialize};

/// Pixel size of one rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned pixel rectangle holding the data marks of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    /// Insets `viewport` by the given margins.
    #[must_use]
    pub fn inset(viewport: Viewport, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        Self {
            left,
            top,
            right: (width - right).max(left + 1.0),
            bottom: (height - bottom).max(top + 1.0),
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}
