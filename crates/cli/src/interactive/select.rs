//! Select, multiselect and confirm prompts.
//!
//! All three share one state machine over a list of visible choices; confirm
//! is a select over "Yes" and "No".

use std::io::Write;

use indexmap::IndexSet;
use log::debug;
use querent_core::error::{Error, Result};
use querent_core::prompter::{ConfirmRequest, MultiSelectRequest, SelectRequest};
use querent_core::question::{Choice, Validity};

use super::colors::{Status, Theme};
use super::components::{self, Frame};
use super::{next_event, Origin, Screen};
use crate::terminal::renderer::wrapped_line_count;
use crate::terminal::{InputEvent, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Single,
    Multiple,
    Confirm,
}

struct SelectState<'a> {
    message: &'a str,
    mode: Mode,
    choices: Vec<&'a Choice>,
    index: usize,
    selected: IndexSet<String>,
    validation: Validity,
}

impl<'a> SelectState<'a> {
    fn new(message: &'a str, mode: Mode, choices: Vec<&'a Choice>) -> Self {
        Self {
            message,
            mode,
            choices,
            index: 0,
            selected: IndexSet::new(),
            validation: Validity::Valid,
        }
    }

    fn current(&self) -> Option<&'a Choice> {
        self.choices.get(self.index).copied()
    }

    /// Moves the cursor without wrapping around either end.
    fn move_by(&mut self, step: isize) {
        let last = self.choices.len().saturating_sub(1);
        self.index = self.index.saturating_add_signed(step).min(last);
        self.validation = Validity::Valid;
    }

    fn toggle(&mut self) {
        if self.mode != Mode::Multiple {
            return;
        }
        if let Some(choice) = self.current() {
            if !self.selected.shift_remove(&choice.value) {
                self.selected.insert(choice.value.clone());
            }
        }
        self.validation = Validity::Valid;
    }

    fn toggle_all(&mut self) {
        if self.mode != Mode::Multiple {
            return;
        }
        if self.selected.len() == self.choices.len() {
            self.selected.clear();
        } else {
            self.selected = self
                .choices
                .iter()
                .map(|choice| choice.value.clone())
                .collect();
        }
        self.validation = Validity::Valid;
    }

    /// Selected values in choice order.
    fn values(&self) -> Vec<String> {
        self.choices
            .iter()
            .filter(|choice| self.selected.contains(&choice.value))
            .map(|choice| choice.value.clone())
            .collect()
    }

    fn frame(&self, theme: &Theme, status: Status) -> Frame {
        match self.mode {
            Mode::Single => components::select(
                theme,
                self.message,
                status,
                &self.choices,
                self.index,
                &self.validation,
            ),
            Mode::Multiple => components::multiselect(
                theme,
                self.message,
                status,
                &self.choices,
                self.index,
                &self.selected,
                &self.validation,
            ),
            Mode::Confirm => {
                components::confirm(theme, self.message, status, self.index, &self.validation)
            }
        }
    }

    /// Applies one event. `Some` ends the prompt.
    fn handle(
        &mut self,
        event: InputEvent,
        frame: &Frame,
        screen_origin: Option<Origin>,
        validate: &dyn Fn(&SelectState<'_>) -> Validity,
    ) -> Option<Status> {
        match event {
            InputEvent::Up | InputEvent::Left => self.move_by(-1),
            InputEvent::Down | InputEvent::Right => self.move_by(1),
            InputEvent::Space => self.toggle(),
            InputEvent::Char('a' | 'A') => self.toggle_all(),
            InputEvent::Char(c @ ('y' | 'Y' | 'n' | 'N')) if self.mode == Mode::Confirm => {
                self.index = usize::from(c.eq_ignore_ascii_case(&'n'));
                self.validation = Validity::Valid;
            }
            InputEvent::Click { row } => {
                let clicked = screen_origin
                    .and_then(|origin| origin.frame_row(row))
                    .and_then(|row| frame.choice_at(row));
                if let Some(index) = clicked {
                    self.index = index;
                    self.validation = Validity::Valid;
                    self.toggle();
                }
            }
            InputEvent::Enter => {
                self.validation = validate(self);
                if self.validation.is_valid() {
                    return Some(Status::Done);
                }
            }
            InputEvent::CtrlC => return Some(Status::Cancelled),
            _ => {}
        }
        None
    }
}

fn run<W: Write>(
    state: &mut SelectState<'_>,
    validate: &dyn Fn(&SelectState<'_>) -> Validity,
    mut screen: Screen<'_, W>,
) -> Result<()> {
    let theme = screen.theme;
    let mut origin = screen.origin;
    let mut renderer = Renderer::new(&mut screen.out, screen.columns);
    let mut columns = screen.columns;

    let mut frame = state.frame(&theme, Status::Pending);
    renderer.render(&frame.text)?;

    loop {
        if let Some(origin) = origin.as_mut() {
            origin.fit(wrapped_line_count(&frame.text, columns));
        }

        let event = next_event(screen.events)?;
        if let InputEvent::Resize { columns: resized } = event {
            columns = resized;
            renderer.resize(resized);
            renderer.rerender()?;
            continue;
        }

        match state.handle(event, &frame, origin, validate) {
            Some(Status::Done) => {
                renderer.update(&state.frame(&theme, Status::Done).text)?;
                renderer.finish()?;
                return Ok(());
            }
            Some(Status::Cancelled) => {
                renderer.update(&state.frame(&theme, Status::Cancelled).text)?;
                renderer.finish()?;
                debug!("Select prompt cancelled");
                return Err(Error::Cancelled);
            }
            // Choosing cannot fail; only tasks do.
            Some(Status::Pending | Status::Failed) | None => {
                frame = state.frame(&theme, Status::Pending);
                renderer.update(&frame.text)?;
            }
        }
    }
}

/// The answer when a select has exactly one visible choice, in which case
/// no prompt is shown.
pub fn immediate(request: &SelectRequest<'_>) -> Option<String> {
    match request.choices.as_slice() {
        [only] => Some(only.value.clone()),
        _ => None,
    }
}

/// Asks for one of the request's choices.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] on Ctrl-C, [`Error::NoChoices`] when there is
/// nothing to pick, or an IO error if the terminal cannot be written.
pub fn select<W: Write>(request: SelectRequest<'_>, screen: Screen<'_, W>) -> Result<String> {
    if let Some(value) = immediate(&request) {
        debug!("Only one choice for `{}`, selecting it", request.message);
        return Ok(value);
    }
    if request.choices.is_empty() {
        return Err(Error::NoChoices(request.message.to_string()));
    }

    let mut state = SelectState::new(request.message, Mode::Single, request.choices);
    if let Some(default) = &request.default {
        state.index = state
            .choices
            .iter()
            .position(|choice| &choice.value == default)
            .unwrap_or(0);
    }

    let user_validate = request.validate;
    let validate = |state: &SelectState<'_>| match (user_validate, state.current()) {
        (Some(validate), Some(choice)) => validate(&choice.value),
        _ => Validity::Valid,
    };

    run(&mut state, &validate, screen)?;
    state
        .current()
        .map(|choice| choice.value.clone())
        .ok_or_else(|| Error::NoChoices(request.message.to_string()))
}

/// Asks for any number of the request's choices.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] on Ctrl-C or an IO error if the terminal
/// cannot be written.
pub fn multiselect<W: Write>(
    request: MultiSelectRequest<'_>,
    screen: Screen<'_, W>,
) -> Result<Vec<String>> {
    let mut state = SelectState::new(request.message, Mode::Multiple, request.choices);
    state.selected = request
        .default
        .into_iter()
        .filter(|value| state.choices.iter().any(|choice| &choice.value == value))
        .collect();

    let user_validate = request.validate;
    let validate = |state: &SelectState<'_>| match user_validate {
        Some(validate) => validate(&state.values()),
        None => Validity::Valid,
    };

    run(&mut state, &validate, screen)?;
    Ok(state.values())
}

/// Asks a yes/no question. Without a default the cursor starts on "Yes".
///
/// # Errors
///
/// Returns [`Error::Cancelled`] on Ctrl-C or an IO error if the terminal
/// cannot be written.
pub fn confirm<W: Write>(request: ConfirmRequest<'_>, screen: Screen<'_, W>) -> Result<bool> {
    let choices = [
        Choice::new("true").title("Yes"),
        Choice::new("false").title("No"),
    ];
    let mut state = SelectState::new(request.message, Mode::Confirm, choices.iter().collect());
    state.index = usize::from(request.default == Some(false));

    let user_validate = request.validate;
    let validate = |state: &SelectState<'_>| match user_validate {
        Some(validate) => validate(&(state.index == 0)),
        None => Validity::Valid,
    };

    run(&mut state, &validate, screen)?;
    Ok(state.index == 0)
}
