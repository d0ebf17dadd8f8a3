use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use unicode_width::UnicodeWidthStr;

/// Removes ANSI escape sequences (CSI and single-character escapes).
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            plain.push(c);
            continue;
        }
        match chars.next() {
            Some('[') => {
                // Parameters and intermediates run until a final byte in '@'..='~'.
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(_) | None => {}
        }
    }

    plain
}

/// Columns the text occupies once escape sequences are removed.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Number of terminal rows the text takes up at the given width, counting
/// soft wraps. An empty line still takes a row.
pub fn wrapped_line_count(text: &str, columns: u16) -> usize {
    let columns = usize::from(columns.max(1));
    text.split('\n')
        .map(|line| visible_width(line).div_ceil(columns).max(1))
        .sum()
}

/// Paints frames in place.
///
/// Every update erases the rows the previous frame occupied, measured at the
/// current width, and writes the new frame from column zero. Frames are small,
/// so nothing is diffed.
pub struct Renderer<W: Write> {
    out: W,
    columns: u16,
    previous: Option<String>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, columns: u16) -> Self {
        Self {
            out,
            columns: columns.max(1),
            previous: None,
        }
    }

    /// Paints the first frame and hides the cursor.
    pub fn render(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.paint(text)
    }

    pub fn update(&mut self, text: &str) -> io::Result<()> {
        if self.previous.is_none() {
            return self.render(text);
        }
        self.erase()?;
        self.paint(text)
    }

    pub fn resize(&mut self, columns: u16) {
        self.columns = columns.max(1);
    }

    /// Repaints the last frame, typically after [`Renderer::resize`].
    pub fn rerender(&mut self) -> io::Result<()> {
        match self.previous.clone() {
            Some(previous) => self.update(&previous),
            None => Ok(()),
        }
    }

    /// Moves below the last frame and shows the cursor again.
    pub fn finish(&mut self) -> io::Result<()> {
        self.previous = None;
        queue!(self.out, Print("\r\n"), Show)?;
        self.out.flush()
    }

    fn erase(&mut self) -> io::Result<()> {
        let lines = self
            .previous
            .as_deref()
            .map_or(1, |previous| wrapped_line_count(previous, self.columns));

        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        for _ in 1..lines {
            queue!(self.out, MoveUp(1), Clear(ClearType::CurrentLine))?;
        }
        Ok(())
    }

    fn paint(&mut self, text: &str) -> io::Result<()> {
        // Raw mode turns off output post-processing, so a bare '\n' would not
        // return to column zero.
        queue!(self.out, Print(text.replace('\n', "\r\n")))?;
        self.out.flush()?;
        self.previous = Some(text.to_string());
        Ok(())
    }
}

impl<W: Write> Drop for Renderer<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show);
    }
}
