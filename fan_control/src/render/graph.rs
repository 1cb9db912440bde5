//! Temperature history graph.
//!
//! The vertical scale always covers the configured operating band, widened
//! to include any sample outside it, so the band stays visible even when
//! the readings never reach it.

use crate::history::HistoryBuffer;
use crate::mapping::ValueRange;

use super::palette::{PLOT_GLYPH, Palette};

/// Shown instead of the grid before the first sample.
pub const PLACEHOLDER: &str = "Collecting data for graph...";

/// Vertical scale of the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBounds {
    /// Value of the bottom row.
    pub min: f64,
    /// Value of the top row.
    pub max: f64,
}

impl DisplayBounds {
    /// `max - min`; positive whenever the band is.
    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Grid row of `value`; row 0 is the top (hottest).
    ///
    /// `clamp(H-1 - round((v-min)/range * (H-1)), 0, H-1)`
    pub fn row_of(&self, value: f64, height: usize) -> usize {
        let last = (height - 1) as f64;
        let scaled = ((value - self.min) / self.range() * last).round();
        (last - scaled).clamp(0.0, last) as usize
    }

    /// Value represented by grid row `row`.
    pub fn value_at(&self, row: usize, height: usize) -> f64 {
        self.max - row as f64 * self.range() / (height - 1) as f64
    }
}

/// Scale for `history`, or `None` when there is nothing to plot.
pub fn display_bounds(history: &HistoryBuffer<f64>, band: ValueRange) -> Option<DisplayBounds> {
    let (lo, hi) = history.bounds()?;
    Some(DisplayBounds {
        min: band.low.min(lo),
        max: band.high.max(hi),
    })
}

/// Occupancy grid, `height` rows by `width` columns, column `i` holding
/// sample `i` (oldest on the left). Columns past the history stay empty.
pub fn plot(
    history: &HistoryBuffer<f64>,
    bounds: DisplayBounds,
    height: usize,
    width: usize,
) -> Vec<Vec<bool>> {
    let mut grid = vec![vec![false; width]; height];
    for (x, value) in history.iter().enumerate().take(width) {
        grid[bounds.row_of(value, height)][x] = true;
    }
    grid
}

/// Graph lines: labelled grid rows, axis, time direction and legend.
///
/// Only the top, middle (`height / 2`) and bottom rows carry a label; the
/// rest are padded to the same width so columns line up.
pub fn render_graph(
    history: &HistoryBuffer<f64>,
    band: ValueRange,
    height: usize,
    palette: &Palette,
) -> Vec<String> {
    let Some(bounds) = display_bounds(history, band) else {
        return vec![PLACEHOLDER.to_string()];
    };
    let width = history.capacity();
    let grid = plot(history, bounds, height, width);

    let labelled = [0, height / 2, height - 1];
    let label_text = |row: usize| format!("{:.1}°C ", bounds.value_at(row, height));
    let label_width = labelled
        .iter()
        .map(|&row| label_text(row).chars().count())
        .max()
        .unwrap_or(0);
    let blank = " ".repeat(label_width);
    let marker = palette.paint(palette.plot, &PLOT_GLYPH.to_string());

    let mut lines = Vec::with_capacity(height + 3);
    for (y, row) in grid.iter().enumerate() {
        let label = if labelled.contains(&y) {
            format!("{:>label_width$}", label_text(y))
        } else {
            blank.clone()
        };
        let cells: String = row
            .iter()
            .map(|&hit| if hit { marker.as_str() } else { " " })
            .collect();
        lines.push(format!("{label}|{cells}"));
    }
    lines.push(format!("{blank}+{}", "-".repeat(width)));
    lines.push(format!("{blank} Time →"));
    lines.push(format!("  Legend: {marker} CPU Temperature"));
    lines
}
