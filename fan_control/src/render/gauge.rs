//! Fan speed gauge.

use fan_common::hal::types::DutyCycle;

use super::palette::{EMPTY_GLYPH, FILLED_GLYPH, Palette};

/// Text in front of the bar.
pub const GAUGE_LABEL: &str = "Fan Speed: ";

/// `floor(speed / 100 * width)`.
#[inline]
pub fn filled_cells(speed: DutyCycle, width: usize) -> usize {
    usize::from(speed.percent()) * width / 100
}

/// Bar string without styling: `filled` full cells then empty cells.
pub fn bar(speed: DutyCycle, width: usize) -> String {
    let filled = filled_cells(speed, width);
    let mut out = String::with_capacity(width * FILLED_GLYPH.len_utf8());
    out.extend(std::iter::repeat_n(FILLED_GLYPH, filled));
    out.extend(std::iter::repeat_n(EMPTY_GLYPH, width - filled));
    out
}

/// Gauge lines: the bar with its percentage, then the `0%`…`100%` axis.
pub fn render_gauge(speed: DutyCycle, width: usize, palette: &Palette) -> Vec<String> {
    let indent = " ".repeat(GAUGE_LABEL.len());
    vec![
        format!(
            "{GAUGE_LABEL}{} {}%",
            palette.paint(palette.gauge, &bar(speed, width)),
            speed.percent()
        ),
        format!("{indent}0%{}100%", " ".repeat(width.saturating_sub(6))),
    ]
}
