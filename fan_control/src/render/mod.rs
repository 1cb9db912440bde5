//! Text rendering of the controller state.
//!
//! Everything here is a pure function from loop state to lines of text.
//! Colour is injected through a [`Palette`]; with [`Palette::plain`] the
//! output contains no control sequences at all.

pub mod frame;
pub mod gauge;
pub mod graph;
pub mod palette;

pub use frame::{Frame, FrameView, render_frame};
pub use palette::Palette;
