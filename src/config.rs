use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::ReportEngine;
use crate::chart::{ChartRenderer, ChartSetConfig};
use crate::core::Dataset;
use crate::error::{ReportError, ReportResult};
use crate::render::ImageBackend;
use crate::report::PageOptions;

pub const DEFAULT_DATA_PATH: &str = "netflix_titles.csv";
pub const DEFAULT_PORT: u16 = 5000;

/// Process configuration.
///
/// Every field has a default, so an empty JSON object is a valid config file
/// and command-line flags only need to override what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub backend: ImageBackend,
    #[serde(default)]
    pub charts: ChartSetConfig,
    #[serde(default)]
    pub page: PageOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            bind_addr: default_bind_addr(),
            backend: ImageBackend::default(),
            charts: ChartSetConfig::default(),
            page: PageOptions::default(),
        }
    }
}

impl ReportConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ReportError::Io(err),
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> ReportResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ReportError::Parse(format!("invalid config json: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReportResult<()> {
        self.charts.validate()
    }

    /// Wires the loaded dataset into a request-ready engine.
    pub fn build_engine(&self, dataset: Arc<Dataset>) -> ReportResult<ReportEngine> {
        let charts = ChartRenderer::new(&self.charts, self.backend)?;
        Ok(ReportEngine::new(dataset, charts, self.page.clone()))
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}
