#[cfg(feature = "parallel-render")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::chart::layout::{category_count_frame, histogram_frame, horizontal_count_frame};
use crate::chart::{ChartKind, ChartSetConfig, ChartSpec, ChartStyle};
use crate::core::{
    Dataset, build_histogram, count_by_category, count_scaled_density, top_n_by_frequency,
};
use crate::error::ReportResult;
use crate::render::{EncodedImage, ImageBackend, RenderFrame, Renderer};

/// One encoded chart; its identity is its position in the rendered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub title: String,
    pub image: EncodedImage,
}

impl RenderedChart {
    #[must_use]
    pub fn base64(&self) -> String {
        self.image.to_base64()
    }

    #[must_use]
    pub fn data_uri(&self) -> String {
        self.image.data_uri()
    }
}

/// Turns a dataset into the fixed, ordered chart sequence.
///
/// The renderer itself holds only configuration. Every chart is drawn into its
/// own `RenderFrame` and encoded by a backend instance created for that chart,
/// so concurrent calls never observe each other's drawing state.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    specs: Vec<ChartSpec>,
    backend: ImageBackend,
    style: ChartStyle,
}

impl ChartRenderer {
    pub fn new(config: &ChartSetConfig, backend: ImageBackend) -> ReportResult<Self> {
        config.validate()?;
        Ok(Self::from_specs(config.specs(), backend))
    }

    #[must_use]
    pub fn from_specs(specs: Vec<ChartSpec>, backend: ImageBackend) -> Self {
        Self {
            specs,
            backend,
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn specs(&self) -> &[ChartSpec] {
        &self.specs
    }

    #[must_use]
    pub fn backend(&self) -> ImageBackend {
        self.backend
    }

    /// Aggregates the spec's field and lays out the chart scene.
    pub fn build_frame(&self, spec: &ChartSpec, dataset: &Dataset) -> ReportResult<RenderFrame> {
        match &spec.kind {
            ChartKind::CategoryCount { field } => {
                let counts = count_by_category(dataset.categorical(field)?);
                category_count_frame(spec, &counts, &self.style)
            }
            ChartKind::TopFrequency { field, limit } => {
                let counts = top_n_by_frequency(count_by_category(dataset.categorical(field)?), *limit);
                horizontal_count_frame(spec, &counts, &self.style)
            }
            ChartKind::Distribution {
                field,
                bins,
                density,
            } => {
                let values = dataset.numeric(field)?;
                let histogram = build_histogram(&values, *bins)?;
                let curve = if *density && !values.is_empty() {
                    let curve = count_scaled_density(&values, histogram.bin_width());
                    if curve.is_none() {
                        warn!(
                            field = field.as_str(),
                            samples = values.len(),
                            "skipping density curve for degenerate sample"
                        );
                    }
                    curve
                } else {
                    None
                };
                histogram_frame(spec, &histogram, curve.as_deref(), &self.style)
            }
        }
    }

    /// Draws one chart with a caller-supplied backend.
    pub fn render_with<R: Renderer + ?Sized>(
        &self,
        spec: &ChartSpec,
        dataset: &Dataset,
        renderer: &mut R,
    ) -> ReportResult<RenderedChart> {
        let frame = self.build_frame(spec, dataset)?;
        let image = renderer.render(&frame)?;
        let stats = renderer.last_stats();
        debug!(
            chart = spec.title.as_str(),
            backend = renderer.backend_name(),
            rects = stats.rects_drawn,
            lines = stats.lines_drawn,
            texts = stats.texts_drawn,
            bytes = image.bytes.len(),
            "rendered chart"
        );

        Ok(RenderedChart {
            title: spec.title.clone(),
            image,
        })
    }

    /// Draws one chart with a fresh backend instance.
    pub fn render_chart(&self, spec: &ChartSpec, dataset: &Dataset) -> ReportResult<RenderedChart> {
        let mut renderer = self.backend.create()?;
        self.render_with(spec, dataset, renderer.as_mut())
    }

    /// Renders every configured chart in order; the first failure fails the batch.
    pub fn render_all(&self, dataset: &Dataset) -> ReportResult<Vec<RenderedChart>> {
        #[cfg(feature = "parallel-render")]
        {
            return self
                .specs
                .par_iter()
                .map(|spec| self.render_chart(spec, dataset))
                .collect();
        }

        #[cfg(not(feature = "parallel-render"))]
        {
            self.specs
                .iter()
                .map(|spec| self.render_chart(spec, dataset))
                .collect()
        }
    }
}
