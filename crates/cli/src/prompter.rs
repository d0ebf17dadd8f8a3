//! The terminal implementation of [`Prompter`].

use std::io::{stdout, Stdout};

use crossbeam_channel::{unbounded, Receiver};
use crossterm::{cursor, terminal};
use log::debug;
use querent_core::answers::Answer;
use querent_core::error::Result;
use querent_core::prompter::{
    ConfirmRequest, MultiSelectRequest, Prompter, SelectRequest, TaskRequest, TextRequest,
};

use crate::interactive::colors::Theme;
use crate::interactive::{select, spinner, text, Origin, Screen};
use crate::terminal::{InputEvent, InputReader, RawModeGuard};

const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// The terminal for the span of one question.
///
/// Fields drop in order: the channel closes, the reader thread is joined,
/// then raw mode is released.
struct Attached {
    events: Receiver<InputEvent>,
    _reader: InputReader,
    _guard: RawModeGuard,
    columns: u16,
    origin: Option<Origin>,
}

impl Attached {
    fn screen(&self, theme: Theme) -> Screen<'_, Stdout> {
        let screen = Screen::new(&self.events, stdout(), self.columns).theme(theme);
        match self.origin {
            Some(origin) => screen.origin(origin),
            None => screen,
        }
    }
}

/// Asks questions on the process's terminal.
///
/// Raw mode is held only while a question is open.
#[derive(Debug, Clone)]
pub struct TerminalPrompter {
    theme: Theme,
    mouse: bool,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            mouse: true,
        }
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Whether clicks and the scroll wheel move the selection.
    #[must_use]
    pub fn mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    fn attach(&self) -> Result<Attached> {
        let guard = RawModeGuard::enable(self.mouse)?;
        let (columns, rows) = terminal::size().unwrap_or(FALLBACK_SIZE);

        // Cursor queries read stdin, so this must happen before the reader starts.
        let origin = cursor::position()
            .ok()
            .map(|(_, row)| Origin { row, height: rows });
        debug!("Attached to a {columns}x{rows} terminal at {origin:?}");

        let (sender, events) = unbounded();
        let reader = InputReader::spawn(sender);

        Ok(Attached {
            events,
            _reader: reader,
            _guard: guard,
            columns,
            origin,
        })
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, request: TextRequest<'_>) -> Result<String> {
        let attached = self.attach()?;
        text::text(request, attached.screen(self.theme))
    }

    fn select(&mut self, request: SelectRequest<'_>) -> Result<String> {
        if let Some(value) = select::immediate(&request) {
            return Ok(value);
        }
        let attached = self.attach()?;
        select::select(request, attached.screen(self.theme))
    }

    fn multiselect(&mut self, request: MultiSelectRequest<'_>) -> Result<Vec<String>> {
        let attached = self.attach()?;
        select::multiselect(request, attached.screen(self.theme))
    }

    fn confirm(&mut self, request: ConfirmRequest<'_>) -> Result<bool> {
        let attached = self.attach()?;
        select::confirm(request, attached.screen(self.theme))
    }

    fn task(&mut self, request: TaskRequest<'_>) -> Result<Answer> {
        let attached = self.attach()?;
        spinner::task(request, attached.screen(self.theme))
    }
}
