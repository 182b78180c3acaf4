use crate::chart::{ChartSpec, ChartStyle};
use crate::core::{
    CategoryCount, DensityPoint, Histogram, LinearScale, PlotArea, format_tick, max_count,
    nice_domain,
};
use crate::error::ReportResult;
use crate::render::{
    LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

const MARGIN_TOP_PX: f64 = 36.0;
const MARGIN_RIGHT_PX: f64 = 24.0;
const MARGIN_BOTTOM_PX: f64 = 52.0;
const VALUE_TICK_TARGET: usize = 6;

/// Vertical bars, one per category, in the given order.
pub fn category_count_frame(
    spec: &ChartSpec,
    counts: &[CategoryCount],
    style: &ChartStyle,
) -> ReportResult<RenderFrame> {
    let (value_scale_domain, value_ticks) = count_axis(max_count(counts) as f64)?;
    let left = left_margin(&value_ticks, style);
    let area = PlotArea::inset(
        spec.viewport,
        left,
        MARGIN_TOP_PX,
        MARGIN_RIGHT_PX,
        MARGIN_BOTTOM_PX,
    );
    let y_scale = LinearScale::new(
        value_scale_domain.0,
        value_scale_domain.1,
        area.bottom,
        area.top,
    )?;

    let mut frame = decorated_frame(spec, area, style);
    frame = draw_y_value_ticks(frame, area, y_scale, &value_ticks, style)?;

    let band = area.width() / counts.len().max(1) as f64;
    let bar_width = band * style.bar_fill_ratio;
    for (index, entry) in counts.iter().enumerate() {
        let center = area.left + band * (index as f64 + 0.5);
        let top = y_scale.domain_to_pixel(entry.count as f64)?;
        let color = spec.palette.color_at(index, counts.len());
        frame = frame.with_rect(RectPrimitive::new(
            center - bar_width / 2.0,
            top,
            bar_width,
            area.bottom - top,
            color,
        ));
        frame = frame
            .with_line(LinePrimitive::new(
                center,
                area.bottom,
                center,
                area.bottom + style.tick_length_px,
                style.axis_line_width,
                style.axis_color,
            ))
            .with_text(TextPrimitive::new(
                style.shorten_label(&entry.label),
                center,
                area.bottom + style.tick_length_px + style.tick_font_size_px + 3.0,
                style.tick_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
    }

    Ok(draw_spines(frame, area, style))
}

/// Horizontal bars, first entry at the top.
pub fn horizontal_count_frame(
    spec: &ChartSpec,
    counts: &[CategoryCount],
    style: &ChartStyle,
) -> ReportResult<RenderFrame> {
    let (value_scale_domain, value_ticks) = count_axis(max_count(counts) as f64)?;
    let labels = counts
        .iter()
        .map(|entry| style.shorten_label(&entry.label))
        .collect::<Vec<_>>();
    let widest_label = labels
        .iter()
        .map(|label| ChartStyle::estimate_text_width(label, style.tick_font_size_px))
        .fold(0.0, f64::max);
    let left = 24.0 + style.label_font_size_px + style.tick_length_px + widest_label;
    let area = PlotArea::inset(
        spec.viewport,
        left,
        MARGIN_TOP_PX,
        MARGIN_RIGHT_PX,
        MARGIN_BOTTOM_PX,
    );
    let x_scale = LinearScale::new(
        value_scale_domain.0,
        value_scale_domain.1,
        area.left,
        area.right,
    )?;

    let mut frame = decorated_frame(spec, area, style);
    frame = draw_x_value_ticks(frame, area, x_scale, &value_ticks, style)?;

    let band = area.height() / counts.len().max(1) as f64;
    let bar_height = band * style.bar_fill_ratio;
    for (index, (entry, label)) in counts.iter().zip(labels).enumerate() {
        let center = area.top + band * (index as f64 + 0.5);
        let right = x_scale.domain_to_pixel(entry.count as f64)?;
        let color = spec.palette.color_at(index, counts.len());
        frame = frame
            .with_rect(RectPrimitive::new(
                area.left,
                center - bar_height / 2.0,
                right - area.left,
                bar_height,
                color,
            ))
            .with_line(LinePrimitive::new(
                area.left - style.tick_length_px,
                center,
                area.left,
                center,
                style.axis_line_width,
                style.axis_color,
            ))
            .with_text(TextPrimitive::new(
                label,
                area.left - style.tick_length_px - 3.0,
                center + style.tick_font_size_px / 3.0,
                style.tick_font_size_px,
                style.text_color,
                TextHAlign::Right,
            ));
    }

    Ok(draw_spines(frame, area, style))
}

/// Histogram bars with an optional density curve on the same count axis.
pub fn histogram_frame(
    spec: &ChartSpec,
    histogram: &Histogram,
    density: Option<&[DensityPoint]>,
    style: &ChartStyle,
) -> ReportResult<RenderFrame> {
    let density = density.filter(|curve| curve.len() >= 2);
    let peak_density = density
        .map(|curve| curve.iter().map(|point| point.y).fold(0.0, f64::max))
        .unwrap_or(0.0);
    let peak = (histogram.max_count() as f64).max(peak_density);
    let (value_scale_domain, value_ticks) = count_axis(peak)?;

    let left = left_margin(&value_ticks, style);
    let area = PlotArea::inset(
        spec.viewport,
        left,
        MARGIN_TOP_PX,
        MARGIN_RIGHT_PX,
        MARGIN_BOTTOM_PX,
    );
    let y_scale = LinearScale::new(
        value_scale_domain.0,
        value_scale_domain.1,
        area.bottom,
        area.top,
    )?;

    let (x_start, x_end) = match (histogram.edges.first(), histogram.edges.last()) {
        (Some(first), Some(last)) if last > first => {
            let pad = (last - first) * 0.05;
            (first - pad, last + pad)
        }
        _ => (0.0, 1.0),
    };
    let x_scale = LinearScale::new(x_start, x_end, area.left, area.right)?;
    let x_ticks = x_scale
        .nice_ticks(VALUE_TICK_TARGET)
        .into_iter()
        .filter(|tick| (x_start..=x_end).contains(tick))
        .collect::<Vec<_>>();

    let mut frame = decorated_frame(spec, area, style);
    frame = draw_y_value_ticks(frame, area, y_scale, &value_ticks, style)?;
    frame = draw_x_value_ticks(frame, area, x_scale, &x_ticks, style)?;

    let bar_count = histogram.counts.len();
    for (index, (count, edges)) in histogram
        .counts
        .iter()
        .zip(histogram.edges.windows(2))
        .enumerate()
    {
        let x_left = x_scale.domain_to_pixel(edges[0])?;
        let x_right = x_scale.domain_to_pixel(edges[1])?;
        let top = y_scale.domain_to_pixel(*count as f64)?;
        let color = spec.palette.color_at(index, bar_count);
        frame = frame.with_rect(
            RectPrimitive::new(
                x_left,
                top,
                x_right - x_left,
                area.bottom - top,
                color.with_alpha(style.histogram_alpha),
            )
            .with_border(0.6, color.mix(style.axis_color, 0.35)),
        );
    }

    if let Some(curve) = density {
        let color = spec.palette.color_at(0, 1);
        let points = curve
            .iter()
            .map(|point| -> ReportResult<(f64, f64)> {
                Ok((
                    x_scale.domain_to_pixel(point.x)?,
                    y_scale.domain_to_pixel(point.y)?,
                ))
            })
            .collect::<ReportResult<Vec<_>>>()?;
        frame = frame.with_polyline(PolylinePrimitive::new(
            points,
            style.density_line_width,
            color,
        ));
    }

    Ok(draw_spines(frame, area, style))
}

/// Domain `[0, nice upper]` and its ticks for a count axis peaking at `peak`.
fn count_axis(peak: f64) -> ReportResult<((f64, f64), Vec<f64>)> {
    let upper = if peak > 0.0 {
        nice_domain(0.0, peak, VALUE_TICK_TARGET).1
    } else {
        1.0
    };
    let ticks = LinearScale::new(0.0, upper, 0.0, 1.0)?.nice_ticks(VALUE_TICK_TARGET);
    Ok(((0.0, upper), ticks))
}

fn left_margin(value_ticks: &[f64], style: &ChartStyle) -> f64 {
    let widest = value_ticks
        .iter()
        .map(|tick| ChartStyle::estimate_text_width(&format_tick(*tick), style.tick_font_size_px))
        .fold(0.0, f64::max);
    24.0 + style.label_font_size_px + style.tick_length_px + widest
}

/// Background, title and axis titles.
fn decorated_frame(spec: &ChartSpec, area: PlotArea, style: &ChartStyle) -> RenderFrame {
    let width = f64::from(spec.viewport.width);
    let height = f64::from(spec.viewport.height);
    let mut frame = RenderFrame::new(spec.viewport).with_background(style.background);

    frame = push_text(
        frame,
        TextPrimitive::new(
            spec.title.as_str(),
            width / 2.0,
            MARGIN_TOP_PX - 12.0,
            style.title_font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );
    frame = push_text(
        frame,
        TextPrimitive::new(
            spec.x_label.as_str(),
            (area.left + area.right) / 2.0,
            height - 10.0,
            style.label_font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );
    push_text(
        frame,
        TextPrimitive::new(
            spec.y_label.as_str(),
            8.0 + style.label_font_size_px,
            (area.top + area.bottom) / 2.0,
            style.label_font_size_px,
            style.text_color,
            TextHAlign::Center,
        )
        .rotated(-90.0),
    )
}

fn push_text(frame: RenderFrame, text: TextPrimitive) -> RenderFrame {
    if text.text.is_empty() {
        return frame;
    }
    frame.with_text(text)
}

fn draw_y_value_ticks(
    mut frame: RenderFrame,
    area: PlotArea,
    scale: LinearScale,
    ticks: &[f64],
    style: &ChartStyle,
) -> ReportResult<RenderFrame> {
    for tick in ticks {
        let y = scale.domain_to_pixel(*tick)?;
        frame = frame
            .with_line(LinePrimitive::new(
                area.left,
                y,
                area.right,
                y,
                0.5,
                style.grid_color,
            ))
            .with_line(LinePrimitive::new(
                area.left - style.tick_length_px,
                y,
                area.left,
                y,
                style.axis_line_width,
                style.axis_color,
            ))
            .with_text(TextPrimitive::new(
                format_tick(*tick),
                area.left - style.tick_length_px - 3.0,
                y + style.tick_font_size_px / 3.0,
                style.tick_font_size_px,
                style.text_color,
                TextHAlign::Right,
            ));
    }
    Ok(frame)
}

fn draw_x_value_ticks(
    mut frame: RenderFrame,
    area: PlotArea,
    scale: LinearScale,
    ticks: &[f64],
    style: &ChartStyle,
) -> ReportResult<RenderFrame> {
    for tick in ticks {
        let x = scale.domain_to_pixel(*tick)?;
        frame = frame
            .with_line(LinePrimitive::new(
                x,
                area.bottom,
                x,
                area.bottom + style.tick_length_px,
                style.axis_line_width,
                style.axis_color,
            ))
            .with_text(TextPrimitive::new(
                format_tick(*tick),
                x,
                area.bottom + style.tick_length_px + style.tick_font_size_px + 3.0,
                style.tick_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
    }
    Ok(frame)
}

fn draw_spines(frame: RenderFrame, area: PlotArea, style: &ChartStyle) -> RenderFrame {
    let line = |x1, y1, x2, y2| {
        LinePrimitive::new(x1, y1, x2, y2, style.axis_line_width, style.axis_color)
    };
    frame
        .with_line(line(area.left, area.top, area.right, area.top))
        .with_line(line(area.right, area.top, area.right, area.bottom))
        .with_line(line(area.left, area.bottom, area.right, area.bottom))
        .with_line(line(area.left, area.top, area.left, area.bottom))
}
