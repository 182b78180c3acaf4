mod frame;
mod image;
mod png_backend;
mod primitives;
mod svg_backend;

pub use frame::RenderFrame;
pub use image::{EncodedImage, ImageFormat};
pub use png_backend::{PngRenderer, system_fonts};
pub use primitives::{
    Color, LinePrimitive, PolylinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_backend::SvgRenderer;

use serde::{Deserialize, Serialize};

use crate::error::ReportResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` and turn
/// it into encoded image bytes, so drawing code stays isolated from chart
/// aggregation logic.
pub trait Renderer {
    fn backend_name(&self) -> &'static str;

    fn render(&mut self, frame: &RenderFrame) -> ReportResult<EncodedImage>;

    /// Primitive counts of the most recent successful `render` call.
    fn last_stats(&self) -> RenderStats;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
}

/// Selects which backend encodes chart frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageBackend {
    #[default]
    Png,
    Svg,
    Cairo,
}

impl ImageBackend {
    /// Creates a fresh renderer; every chart render gets its own instance.
    pub fn create(self) -> ReportResult<Box<dyn Renderer + Send>> {
        match self {
            Self::Png => Ok(Box::new(PngRenderer::new())),
            Self::Svg => Ok(Box::new(SvgRenderer::new())),
            #[cfg(feature = "cairo-backend")]
            Self::Cairo => Ok(Box::new(CairoRenderer::new())),
            #[cfg(not(feature = "cairo-backend"))]
            Self::Cairo => Err(crate::error::ReportError::InvalidData(
                "cairo backend requires the `cairo-backend` feature".to_owned(),
            )),
        }
    }

    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png | Self::Cairo => ImageFormat::Png,
            Self::Svg => ImageFormat::Svg,
        }
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoRenderer;
