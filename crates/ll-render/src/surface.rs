use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// Surface d'affichage du player.
///
/// Implemented by [`TerminalSurface`]; tests plug in a recording surface.
///
/// # Example
/// ```
/// use ll_render::surface::Surface;
///
/// struct Discard;
/// impl Surface for Discard {
///     fn clear(&mut self) -> std::io::Result<()> { Ok(()) }
///     fn present(&mut self, _frame: &str) -> std::io::Result<()> { Ok(()) }
/// }
/// ```
pub trait Surface {
    /// Efface tout ce qui a été affiché.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn clear(&mut self) -> io::Result<()>;

    /// Write one decoded frame. Must be visible when this returns.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn present(&mut self, frame: &str) -> io::Result<()>;
}

/// Terminal ANSI via crossterm : clear + curseur en haut à gauche, puis la frame.
///
/// # Example
/// ```
/// use ll_render::surface::{Surface, TerminalSurface};
/// let mut surface = TerminalSurface::new(Vec::new());
/// surface.present("▓▓").unwrap();
/// assert!(surface.into_inner().ends_with("▓▓\n".as_bytes()));
/// ```
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    /// Wrap a writer, usually `stdout().lock()`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn present(&mut self, frame: &str) -> io::Result<()> {
        self.out.write_all(frame.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}
