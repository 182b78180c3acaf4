use std::fmt::Write as _;

use crate::error::{ReportError, ReportResult};
use crate::render::{
    Color, EncodedImage, ImageFormat, RenderFrame, RenderStats, Renderer, TextHAlign,
};

pub(crate) const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, sans-serif";

/// Writes a frame as standalone SVG markup.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    last_stats: RenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for SvgRenderer {
    fn backend_name(&self) -> &'static str {
        "svg"
    }

    fn render(&mut self, frame: &RenderFrame) -> ReportResult<EncodedImage> {
        let (markup, stats) = write_svg(frame)?;
        self.last_stats = stats;
        Ok(EncodedImage::new(ImageFormat::Svg, markup.into_bytes()))
    }

    fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}

/// Serializes a validated frame into SVG markup.
pub(crate) fn write_svg(frame: &RenderFrame) -> ReportResult<(String, RenderStats)> {
    frame.validate()?;
    write_svg_markup(frame).map_err(|err| ReportError::Render(format!("svg write failed: {err}")))
}

fn write_svg_markup(frame: &RenderFrame) -> Result<(String, RenderStats), std::fmt::Error> {
    let width = frame.viewport.width;
    let height = frame.viewport.height;
    let mut out = String::with_capacity(256 + frame.primitive_count() * 96);
    let mut stats = RenderStats::default();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{width}" height="{height}"{}/>"#,
        fill_attrs(frame.background)
    )?;

    for rect in &frame.rects {
        write!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill_attrs(rect.fill_color)
        )?;
        if rect.border_width > 0.0 {
            write!(out, "{}", stroke_attrs(rect.border_color, rect.border_width))?;
        }
        writeln!(out, "/>")?;
        stats.rects_drawn += 1;
    }

    for line in &frame.lines {
        writeln!(
            out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"{}/>"#,
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            stroke_attrs(line.color, line.stroke_width)
        )?;
        stats.lines_drawn += 1;
    }

    for polyline in &frame.polylines {
        write!(out, r#"<polyline fill="none" points=""#)?;
        for (index, (x, y)) in polyline.points.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            write!(out, "{x:.2},{y:.2}")?;
        }
        writeln!(
            out,
            r#""{} stroke-linejoin="round"/>"#,
            stroke_attrs(polyline.color, polyline.stroke_width)
        )?;
        stats.polylines_drawn += 1;
    }

    for text in &frame.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        write!(
            out,
            r#"<text x="{:.2}" y="{:.2}" font-family="{FONT_FAMILY}" font-size="{:.1}" text-anchor="{anchor}"{}"#,
            text.x,
            text.y,
            text.font_size_px,
            fill_attrs(text.color)
        )?;
        if text.rotation_deg != 0.0 {
            write!(
                out,
                r#" transform="rotate({:.1} {:.2} {:.2})""#,
                text.rotation_deg, text.x, text.y
            )?;
        }
        writeln!(out, ">{}</text>", escape_xml(&text.text))?;
        stats.texts_drawn += 1;
    }

    writeln!(out, "</svg>")?;
    Ok((out, stats))
}

fn fill_attrs(color: Color) -> String {
    if color.alpha < 1.0 {
        format!(
            r#" fill="{}" fill-opacity="{:.3}""#,
            color.to_hex(),
            color.alpha
        )
    } else {
        format!(r#" fill="{}""#, color.to_hex())
    }
}

fn stroke_attrs(color: Color, width: f64) -> String {
    if color.alpha < 1.0 {
        format!(
            r#" stroke="{}" stroke-opacity="{:.3}" stroke-width="{width:.2}""#,
            color.to_hex(),
            color.alpha
        )
    } else {
        format!(r#" stroke="{}" stroke-width="{width:.2}""#, color.to_hex())
    }
}

/// Escapes markup characters and replaces anything outside the XML `Char`
/// production with U+FFFD.
fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            ch if is_xml_char(ch) => escaped.push(ch),
            _ => escaped.push(char::REPLACEMENT_CHARACTER),
        }
    }
    escaped
}

fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
