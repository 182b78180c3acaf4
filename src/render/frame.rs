use crate::core::Viewport;
use crate::error::{ReportError, ReportResult};
use crate::render::{Color, LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// A frame is the complete drawing context of one chart: backends paint the
/// background, then rects, lines, polylines and texts in that order. Nothing
/// survives between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::WHITE,
            rects: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.polylines.push(polyline);
        self
    }

    pub fn validate(&self) -> ReportResult<()> {
        if !self.viewport.is_valid() {
            return Err(ReportError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.background.validate()?;
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.polylines.is_empty()
            && self.texts.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.polylines.len() + self.texts.len()
    }
}
