use crate::error::{ReportError, ReportResult};

/// Linear mapping from a data domain onto a pixel range.
///
/// The pixel range may run backwards (`pixel_start > pixel_end`), which is how
/// value axes grow upwards on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ReportResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ReportError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(ReportError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ReportResult<f64> {
        if !value.is_finite() {
            return Err(ReportError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ReportResult<f64> {
        if !pixel.is_finite() {
            return Err(ReportError::InvalidData("pixel must be finite".to_owned()));
        }

        let pixel_span = self.pixel_end - self.pixel_start;
        if pixel_span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.pixel_start) / pixel_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Round-number ticks inside the domain, at most roughly `target_count` of them.
    #[must_use]
    pub fn nice_ticks(self, target_count: usize) -> Vec<f64> {
        let (low, high) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let step = nice_step(high - low, target_count.max(2));
        let first = (low / step).ceil() * step;

        let mut ticks = Vec::new();
        let mut index = 0usize;
        loop {
            let tick = first + step * index as f64;
            if tick > high + step * 1e-9 {
                break;
            }
            // Snap away float noise like 0.30000000000000004.
            ticks.push((tick / step).round() * step);
            index += 1;
        }
        ticks
    }
}

/// Largest "1, 2, 5 x 10^k" step that keeps the tick count near `target_count`.
#[must_use]
pub fn nice_step(span: f64, target_count: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }

    let raw = span / target_count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Extends `[min, max]` outwards to the nearest multiples of a nice step.
#[must_use]
pub fn nice_domain(min: f64, max: f64, target_count: usize) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }

    let step = nice_step(max - min, target_count);
    ((min / step).floor() * step, (max / step).ceil() * step)
}

/// Formats a tick value without trailing zeros.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}
