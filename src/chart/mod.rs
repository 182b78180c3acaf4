//! Chart set: aggregation, frame layout and per-chart encoding.

mod layout;
mod renderer;
mod spec;
mod style;

pub use layout::{category_count_frame, histogram_frame, horizontal_count_frame};
pub use renderer::{ChartRenderer, RenderedChart};
pub use spec::{ChartConfig, ChartKind, ChartSetConfig, ChartSpec, TOP_N_PLACEHOLDER};
pub use style::{ChartStyle, Palette};
