use std::sync::Arc;

use tracing::debug;

use crate::chart::{ChartRenderer, RenderedChart};
use crate::core::Dataset;
use crate::error::ReportResult;
use crate::report::{PageOptions, compose_page, format_table};

/// Main pipeline facade consumed by the HTTP handler and the CLI.
///
/// `ReportEngine` owns the shared read-only dataset plus rendering
/// configuration. Each call recomputes its output from scratch; nothing is
/// cached between calls. Clones share the dataset.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    dataset: Arc<Dataset>,
    charts: ChartRenderer,
    page: PageOptions,
}

impl ReportEngine {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, charts: ChartRenderer, page: PageOptions) -> Self {
        Self {
            dataset,
            charts,
            page,
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn chart_renderer(&self) -> &ChartRenderer {
        &self.charts
    }

    #[must_use]
    pub fn page_options(&self) -> &PageOptions {
        &self.page
    }

    pub fn render_charts(&self) -> ReportResult<Vec<RenderedChart>> {
        self.charts.render_all(&self.dataset)
    }

    #[must_use]
    pub fn format_table(&self) -> String {
        format_table(&self.dataset, &self.page.table_classes)
    }

    /// Runs the full pipeline: charts, table, then page composition.
    pub fn render_page(&self) -> ReportResult<String> {
        let charts = self.render_charts()?;
        let table = self.format_table();
        let page = compose_page(&self.page, &charts, &table);
        debug!(
            charts = charts.len(),
            table_bytes = table.len(),
            page_bytes = page.len(),
            "composed page"
        );
        Ok(page)
    }
}
