pub mod aggregate;
pub mod dataset;
pub mod density;
pub mod histogram;
pub mod scale;
pub mod types;

pub use aggregate::{CategoryCount, count_by_category, max_count, top_n_by_frequency};
pub use dataset::{Dataset, MISSING_TOKENS, is_missing};
pub use density::{DENSITY_GRID_SIZE, DensityPoint, GaussianKde, count_scaled_density};
pub use histogram::{BinRule, Histogram, MAX_BINS, auto_bin_count, build_histogram, percentile};
pub use scale::{LinearScale, format_tick, nice_domain, nice_step};
pub use types::{PlotArea, Viewport};
