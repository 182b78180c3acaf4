use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ReportError, ReportResult};
use crate::render::{
    Color, EncodedImage, ImageFormat, RectPrimitive, RenderFrame, RenderStats, Renderer,
    TextHAlign,
};

/// Cairo + Pango + PangoCairo PNG backend.
///
/// A fresh image surface is created for every frame, sized to the frame
/// viewport, and encoded to PNG once drawing completes.
#[derive(Debug, Default)]
pub struct CairoRenderer {
    last_stats: RenderStats,
}

impl CairoRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&mut self, context: &Context, frame: &RenderFrame) -> ReportResult<()> {
        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = RenderStats::default();

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            }
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for polyline in &frame.polylines {
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context.set_line_join(cairo::LineJoin::Round);
            let mut points = polyline.points.iter();
            if let Some((x, y)) = points.next() {
                context.move_to(*x, *y);
            }
            for (x, y) in points {
                context.line_to(*x, *y);
            }
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let offset_x = match text.h_align {
                TextHAlign::Left => 0.0,
                TextHAlign::Center => -f64::from(text_width) / 2.0,
                TextHAlign::Right => -f64::from(text_width),
            };
            let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

            context.save().map_err(|err| map_backend_error("failed to save state", err))?;
            context.translate(text.x, text.y);
            context.rotate(text.rotation_deg.to_radians());
            apply_color(context, text.color);
            context.move_to(offset_x, -baseline);
            pangocairo::functions::show_layout(context, &layout);
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore state", err))?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    fn render(&mut self, frame: &RenderFrame) -> ReportResult<EncodedImage> {
        frame.validate()?;

        let width = i32::try_from(frame.viewport.width)
            .map_err(|_| ReportError::Render("viewport width exceeds cairo limits".to_owned()))?;
        let height = i32::try_from(frame.viewport.height)
            .map_err(|_| ReportError::Render("viewport height exceeds cairo limits".to_owned()))?;
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;

        {
            let context = Context::new(&surface)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            self.draw(&context, frame)?;
        }
        surface.flush();

        let mut bytes = Vec::new();
        surface
            .write_to_png(&mut bytes)
            .map_err(|err| ReportError::Render(format!("failed to encode png: {err}")))?;
        Ok(EncodedImage::new(ImageFormat::Png, bytes))
    }

    fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ReportError {
    ReportError::Render(format!("{prefix}: {err}"))
}
