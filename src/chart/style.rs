use crate::render::Color;

/// Visual constants shared by every chart frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub background: Color,
    pub axis_color: Color,
    pub text_color: Color,
    pub grid_color: Color,
    pub axis_line_width: f64,
    pub tick_length_px: f64,
    pub title_font_size_px: f64,
    pub label_font_size_px: f64,
    pub tick_font_size_px: f64,
    /// Share of a category band covered by its bar.
    pub bar_fill_ratio: f64,
    pub histogram_alpha: f64,
    pub density_line_width: f64,
    /// Tick labels longer than this are shortened with an ellipsis.
    pub max_label_chars: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            axis_color: Color::rgb(0.15, 0.15, 0.15),
            text_color: Color::rgb(0.1, 0.1, 0.1),
            grid_color: Color::rgba(0.8, 0.8, 0.8, 0.6),
            axis_line_width: 1.0,
            tick_length_px: 4.0,
            title_font_size_px: 14.0,
            label_font_size_px: 11.5,
            tick_font_size_px: 10.0,
            bar_fill_ratio: 0.8,
            histogram_alpha: 0.75,
            density_line_width: 1.8,
            max_label_chars: 22,
        }
    }
}

impl ChartStyle {
    /// Rough rendered width of `text` at `font_size_px`; good enough for margins.
    #[must_use]
    pub fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
        text.chars().count() as f64 * font_size_px * 0.58
    }

    #[must_use]
    pub fn shorten_label(&self, label: &str) -> String {
        if label.chars().count() <= self.max_label_chars {
            return label.to_owned();
        }
        let mut short = label
            .chars()
            .take(self.max_label_chars.saturating_sub(1))
            .collect::<String>();
        short.push('…');
        short
    }
}

/// How bar colors are assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    /// One color for every mark.
    Single(Color),
    /// Colors repeat in order.
    Cycle(Vec<Color>),
    /// Evenly sampled ramp from `light` (first bar) to `dark` (last bar).
    Sequential { light: Color, dark: Color },
}

impl Palette {
    /// Two-color red/black cycle.
    #[must_use]
    pub fn brand() -> Self {
        Self::Cycle(vec![
            Color::rgb(229.0 / 255.0, 9.0 / 255.0, 20.0 / 255.0),
            Color::rgb(34.0 / 255.0, 31.0 / 255.0, 31.0 / 255.0),
        ])
    }

    /// Light-to-dark red ramp.
    #[must_use]
    pub fn reds() -> Self {
        Self::Sequential {
            light: Color::rgb(252.0 / 255.0, 187.0 / 255.0, 161.0 / 255.0),
            dark: Color::rgb(165.0 / 255.0, 15.0 / 255.0, 21.0 / 255.0),
        }
    }

    #[must_use]
    pub fn accent() -> Self {
        Self::Single(Color::rgb(229.0 / 255.0, 9.0 / 255.0, 20.0 / 255.0))
    }

    /// Color of mark `index` out of `count` marks.
    #[must_use]
    pub fn color_at(&self, index: usize, count: usize) -> Color {
        match self {
            Self::Single(color) => *color,
            Self::Cycle(colors) if colors.is_empty() => Color::BLACK,
            Self::Cycle(colors) => colors[index % colors.len()],
            Self::Sequential { light, dark } => {
                let t = if count <= 1 {
                    0.5
                } else {
                    index as f64 / (count - 1) as f64
                };
                light.mix(*dark, t)
            }
        }
    }
}
