use std::fmt;
use std::sync::{Arc, OnceLock};

use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::render::svg_backend::write_svg;
use crate::render::{EncodedImage, ImageFormat, RenderFrame, RenderStats, Renderer};

static SYSTEM_FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();

/// Font database scanned once per process and shared read-only by every render.
#[must_use]
pub fn system_fonts() -> Arc<usvg::fontdb::Database> {
    Arc::clone(SYSTEM_FONTS.get_or_init(|| {
        let mut database = usvg::fontdb::Database::new();
        database.load_system_fonts();
        debug!(faces = database.len(), "loaded system fonts");
        Arc::new(database)
    }))
}

/// Rasterizes frames to PNG through an SVG intermediate and `resvg`.
///
/// Each instance owns its pixmap for the duration of one `render` call, so
/// separate renderers never share drawing state.
pub struct PngRenderer {
    fonts: Arc<usvg::fontdb::Database>,
    last_stats: RenderStats,
}

impl PngRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_fonts(system_fonts())
    }

    #[must_use]
    pub fn with_fonts(fonts: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            fonts,
            last_stats: RenderStats::default(),
        }
    }
}

impl fmt::Debug for PngRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PngRenderer")
            .field("font_faces", &self.fonts.len())
            .field("last_stats", &self.last_stats)
            .finish()
    }
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PngRenderer {
    fn backend_name(&self) -> &'static str {
        "resvg+png"
    }

    fn render(&mut self, frame: &RenderFrame) -> ReportResult<EncodedImage> {
        let (markup, stats) = write_svg(frame)?;

        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fonts);
        let tree = usvg::Tree::from_str(&markup, &options)
            .map_err(|err| ReportError::Render(format!("failed to parse svg: {err}")))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| ReportError::Render("failed to allocate pixmap".to_owned()))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let bytes = pixmap
            .encode_png()
            .map_err(|err| ReportError::Render(format!("failed to encode png: {err}")))?;

        self.last_stats = stats;
        Ok(EncodedImage::new(ImageFormat::Png, bytes))
    }

    fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}
