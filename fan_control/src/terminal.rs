//! Terminal output boundary.

use std::io::{self, IsTerminal, Stdout, Write};

use crate::render::Frame;

/// Cursor home followed by erase-to-end-of-screen.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[J";

/// Writes frames, replacing the previous one when `clear` is set.
#[derive(Debug)]
pub struct Terminal<W: Write> {
    out: W,
    clear: bool,
}

impl Terminal<Stdout> {
    /// Standard output. Clears between frames whenever stdout is an
    /// interactive terminal; colour is the palette's concern.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let clear = out.is_terminal();
        Self::new(out, clear)
    }
}

impl<W: Write> Terminal<W> {
    /// Wrap `out`.
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }

    /// Draw `frame` in place of the previous one.
    ///
    /// # Errors
    /// Any write or flush failure.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        if self.clear {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(self.out, "{frame}")?;
        self.out.flush()
    }

    /// Print a single line below the current frame.
    ///
    /// # Errors
    /// Any write or flush failure.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
