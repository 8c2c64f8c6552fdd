//! Clipboard access
//!
//! Copying goes through the terminal with an OSC 52 escape sequence, which
//! works over SSH and needs no display server. Terminals that ignore OSC 52
//! fail silently; only write errors are reported.

use std::io::{self, Write};

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;

/// Platform primitive for putting text on the system clipboard
pub trait Clipboard {
    /// Copy text to the clipboard
    ///
    /// # Errors
    ///
    /// Returns an error if the text could not be handed to the platform.
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// Clipboard that writes OSC 52 to a terminal
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    /// Clipboard on the process's stdout
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// Clipboard on an arbitrary writer
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        execute!(self.out, CopyToClipboard::to_clipboard_from(text))
    }
}
