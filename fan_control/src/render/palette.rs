//! Styling sequences for rendered text.

/// Marker drawn for each temperature sample.
pub const PLOT_GLYPH: char = '●';
/// Filled gauge cell.
pub const FILLED_GLYPH: char = '█';
/// Empty gauge cell.
pub const EMPTY_GLYPH: char = '░';

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_BLUE: &str = "\x1b[34m";

/// Prefix sequences applied to styled spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Title text.
    pub title: &'static str,
    /// Plotted temperature samples.
    pub plot: &'static str,
    /// Gauge bar.
    pub gauge: &'static str,
    /// Sequence closing a styled span.
    pub reset: &'static str,
}

impl Palette {
    /// No styling.
    pub const fn plain() -> Self {
        Self {
            title: "",
            plot: "",
            gauge: "",
            reset: "",
        }
    }

    /// ANSI colours: bold title, red samples, blue gauge.
    pub const fn ansi() -> Self {
        Self {
            title: ANSI_BOLD,
            plot: ANSI_RED,
            gauge: ANSI_BLUE,
            reset: ANSI_RESET,
        }
    }

    /// `ansi()` when `color` is set, `plain()` otherwise.
    pub const fn select(color: bool) -> Self {
        if color { Self::ansi() } else { Self::plain() }
    }

    /// Wrap `text` in `style`; returns `text` unchanged for an empty style.
    pub fn paint(&self, style: &str, text: &str) -> String {
        if style.is_empty() {
            text.to_string()
        } else {
            format!("{style}{text}{}", self.reset)
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}
