//! Interactive prompts.
//!
//! Each controller runs one question: it paints frames from [`components`],
//! consumes [`InputEvent`]s from a channel until the question settles, and
//! paints a final done or cancelled frame. Controllers never switch terminal
//! modes themselves; whoever hands them a [`Screen`] owns that.

pub mod colors;
pub mod components;
pub mod select;
pub mod spinner;
pub mod text;

use std::io::Write;

use crossbeam_channel::Receiver;
use querent_core::error::{Error, Result};

use crate::terminal::InputEvent;
use colors::Theme;

/// Where the first row of a frame sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub row: u16,
    pub height: u16,
}

impl Origin {
    /// Follows the terminal scrolling up when a frame runs past the bottom.
    pub fn fit(&mut self, lines: usize) {
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        self.row = self.row.min(self.height.saturating_sub(lines));
    }

    /// The frame row under a screen row.
    pub fn frame_row(&self, screen_row: u16) -> Option<usize> {
        screen_row.checked_sub(self.row).map(usize::from)
    }
}

/// Everything a controller draws on and listens to.
pub struct Screen<'a, W: Write> {
    pub events: &'a Receiver<InputEvent>,
    pub out: W,
    pub columns: u16,
    /// Known only on a real terminal; without it clicks are ignored.
    pub origin: Option<Origin>,
    pub theme: Theme,
}

impl<'a, W: Write> Screen<'a, W> {
    pub fn new(events: &'a Receiver<InputEvent>, out: W, columns: u16) -> Self {
        Self {
            events,
            out,
            columns,
            origin: None,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Waits for the next event. A closed channel means input has ended.
fn next_event(events: &Receiver<InputEvent>) -> Result<InputEvent> {
    events.recv().map_err(|_| Error::InputClosed)
}
