//! catalog-report: descriptive charts plus the raw table of a catalog CSV,
//! served as one HTML page.
//!
//! The pipeline is linear: load the dataset once, then per request render the
//! fixed chart set, format the table and compose the page.

pub mod api;
pub mod chart;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod report;
pub mod server;
pub mod telemetry;

pub use api::ReportEngine;
pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
