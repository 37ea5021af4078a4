//! Advisory overflow estimate.
//!
//! The fitter picks tiers from character counts only. This module runs the
//! same proxy one step further (an average glyph advance of half the font
//! size, plus explicit line breaks) to tell whether the chosen tier is
//! likely to spill out of the body area. It never changes the tier.

use serde::Serialize;
use varta_clipping_model::Rect;

use crate::fitter::PresentationParams;

/// Average glyph advance as a fraction of font size.
pub const AVERAGE_ADVANCE: f64 = 0.5;

/// Horizontal gap between body columns, in frame pixels.
pub const COLUMN_GAP_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverflowEstimate {
    /// Lines the body needs, summed across columns.
    pub lines_needed: usize,
    /// Lines the body area holds, summed across columns.
    pub lines_available: usize,
}

impl OverflowEstimate {
    pub fn overflows(&self) -> bool {
        self.lines_needed > self.lines_available
    }

    /// Lines that do not fit; 0 when everything fits.
    pub fn excess_lines(&self) -> usize {
        self.lines_needed.saturating_sub(self.lines_available)
    }
}

/// Characters that fit on one line of a column of `column_width` pixels.
pub fn chars_per_line(column_width: f64, font_px: u32) -> usize {
    let advance = (font_px.max(1) as f64) * AVERAGE_ADVANCE;
    ((column_width / advance).floor() as usize).max(1)
}

/// Estimate whether `body` overflows `area` under `params`.
pub fn estimate_overflow(body: &str, params: &PresentationParams, area: &Rect) -> OverflowEstimate {
    let columns = params.column_count.max(1) as usize;
    let gap_total = COLUMN_GAP_PX * (columns - 1) as f64;
    let column_width = ((area.w - gap_total) / columns as f64).max(0.0);
    let per_line = chars_per_line(column_width, params.body_font_px);

    let lines_needed = body
        .split('\n')
        .map(|paragraph| {
            let len = paragraph.chars().count();
            len.div_ceil(per_line).max(1)
        })
        .sum::<usize>();

    let line_px = params.body_font_px as f64 * params.line_height;
    let lines_per_column = if line_px > 0.0 {
        (area.h / line_px).floor() as usize
    } else {
        0
    };

    OverflowEstimate {
        lines_needed,
        lines_available: lines_per_column * columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitter::{fit, FitInput};

    fn body_area() -> Rect {
        Rect::new(0.0, 0.0, 512.0, 480.0)
    }

    #[test]
    fn test_short_body_fits() {
        let params = fit(FitInput::new(10, 200, false));
        let estimate = estimate_overflow(&"x".repeat(200), &params, &body_area());
        assert!(!estimate.overflows());
        assert_eq!(estimate.excess_lines(), 0);
    }

    #[test]
    fn test_many_line_breaks_overflow_despite_short_length() {
        let body = "a\n".repeat(200);
        let params = fit(FitInput::new(10, body.chars().count(), false));
        let estimate = estimate_overflow(&body, &params, &body_area());
        assert!(estimate.overflows());
        assert!(estimate.excess_lines() > 0);
    }

    #[test]
    fn test_chars_per_line_never_zero() {
        assert_eq!(chars_per_line(0.0, 24), 1);
        assert_eq!(chars_per_line(120.0, 24), 10);
    }

    #[test]
    fn test_more_columns_more_capacity() {
        let one = fit(FitInput::new(0, 0, false));
        let three = fit(FitInput::new(0, 3000, false));
        let a = estimate_overflow("", &one, &body_area());
        let b = estimate_overflow("", &three, &body_area());
        assert!(b.lines_available > a.lines_available);
        assert_eq!(a.lines_needed, 1);
    }
}
