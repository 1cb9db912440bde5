//! Full display frame.

use std::fmt;

use fan_common::hal::types::DutyCycle;

use crate::history::HistoryBuffer;
use crate::mapping::ValueRange;

use super::gauge::render_gauge;
use super::graph::render_graph;
use super::palette::Palette;

/// Heading at the top of every frame.
pub const TITLE: &str = "PWM FAN Control";

/// One rendered screen, line by line, without a trailing newline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    /// Rendered lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `true` if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Everything a frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Unclamped reading of this tick.
    pub raw_celsius: f64,
    /// Speed commanded this tick.
    pub speed: DutyCycle,
    /// Raw temperature history, newest included.
    pub temperatures: &'a HistoryBuffer<f64>,
    /// Operating band; the graph scale always covers it.
    pub band: ValueRange,
    /// Graph rows.
    pub graph_height: usize,
    /// Styling.
    pub palette: Palette,
}

/// Readings line, e.g. `CPU Temperature:  42.5°C    |    Fan Speed:  35%`.
pub fn readings_line(raw_celsius: f64, speed: DutyCycle) -> String {
    format!(
        "CPU Temperature: {raw_celsius:5.1}°C    |    Fan Speed: {:3}%",
        speed.percent()
    )
}

/// Compose title, readings, graph and gauge. The gauge is as wide as the
/// graph.
pub fn render_frame(view: &FrameView<'_>) -> Frame {
    let palette = &view.palette;
    let border = "=".repeat(TITLE.len());

    let mut lines = vec![
        String::new(),
        border.clone(),
        palette.paint(palette.title, TITLE),
        border,
        String::new(),
        readings_line(view.raw_celsius, view.speed),
        String::new(),
    ];
    lines.extend(render_graph(
        view.temperatures,
        view.band,
        view.graph_height,
        palette,
    ));
    lines.push(String::new());
    lines.extend(render_gauge(
        view.speed,
        view.temperatures.capacity(),
        palette,
    ));
    Frame { lines }
}
