use std::io::Write;

use log::debug;
use querent_core::error::{Error, Result};
use querent_core::prompter::TextRequest;
use querent_core::question::Validity;

use super::colors::Status;
use super::components::{self, TextInput};
use super::{next_event, Screen};
use crate::terminal::{InputEvent, Renderer};

/// A single-line editor with a character caret.
#[derive(Debug, Default)]
struct LineEditor {
    chars: Vec<char>,
    caret: usize,
}

impl LineEditor {
    fn value(&self) -> String {
        self.chars.iter().collect()
    }

    fn set(&mut self, value: &str) {
        self.chars = value.chars().collect();
        self.caret = self.chars.len();
    }

    fn insert(&mut self, text: &str) {
        // Pasted line breaks would end up in a single-line answer.
        for c in text.chars().filter(|c| !c.is_control()) {
            self.chars.insert(self.caret, c);
            self.caret += 1;
        }
    }

    fn backspace(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
            self.chars.remove(self.caret);
        }
    }

    fn delete(&mut self) {
        if self.caret < self.chars.len() {
            self.chars.remove(self.caret);
        }
    }

    fn left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    fn right(&mut self) {
        self.caret = (self.caret + 1).min(self.chars.len());
    }
}

struct TextState {
    editor: LineEditor,
    /// The default, until the first key other than Enter clears it.
    prefill: Option<String>,
    validation: Validity,
}

enum Step {
    Continue,
    Submit(String),
    Cancel,
}

impl TextState {
    fn new(default: Option<String>) -> Self {
        Self {
            editor: LineEditor::default(),
            prefill: default.filter(|default| !default.is_empty()),
            validation: Validity::Valid,
        }
    }

    fn handle(&mut self, event: InputEvent) -> Step {
        match event {
            InputEvent::Enter => {
                return Step::Submit(match self.prefill.take() {
                    Some(prefill) => {
                        // Kept in the editor in case validation sends it back.
                        self.editor.set(&prefill);
                        prefill
                    }
                    None => self.editor.value(),
                })
            }
            InputEvent::CtrlC => return Step::Cancel,
            InputEvent::Click { .. } | InputEvent::Resize { .. } => return Step::Continue,
            _ => {}
        }

        // Any other key clears an untouched default before it applies.
        self.prefill = None;

        match event {
            InputEvent::Char(c) => self.typed(&c.to_string()),
            InputEvent::Space => self.typed(" "),
            InputEvent::Paste(text) => self.typed(&text),
            InputEvent::Backspace => self.editor.backspace(),
            InputEvent::Delete => self.editor.delete(),
            InputEvent::Left => self.editor.left(),
            InputEvent::Right => self.editor.right(),
            InputEvent::Home => self.editor.caret = 0,
            InputEvent::End => self.editor.caret = self.editor.chars.len(),
            _ => {}
        }
        Step::Continue
    }

    fn typed(&mut self, text: &str) {
        self.validation = Validity::Valid;
        self.editor.insert(text);
    }

    fn input(&self) -> TextInput<'_> {
        TextInput {
            value: "",
            caret: self.editor.caret,
            prefill: self.prefill.as_deref(),
        }
    }
}

/// Asks for a line of text.
///
/// Submitting an untouched default accepts it as is. A rejected answer
/// stays in the editor with the validation message beneath it.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] on Ctrl-C, [`Error::InputClosed`] when input
/// ends, or an IO error if the terminal cannot be written.
pub fn text<W: Write>(request: TextRequest<'_>, mut screen: Screen<'_, W>) -> Result<String> {
    let theme = screen.theme;
    let mut renderer = Renderer::new(&mut screen.out, screen.columns);
    let mut state = TextState::new(request.default);

    let paint = |state: &TextState, status: Status, value: &str| {
        let input = TextInput {
            value,
            ..state.input()
        };
        components::text(&theme, request.message, status, &input, &state.validation)
    };

    renderer.render(&paint(&state, Status::Pending, &state.editor.value()))?;

    loop {
        let event = next_event(screen.events)?;
        if let InputEvent::Resize { columns } = event {
            renderer.resize(columns);
            renderer.rerender()?;
            continue;
        }

        match state.handle(event) {
            Step::Continue => {}
            Step::Submit(answer) => {
                state.validation = request
                    .validate
                    .map_or(Validity::Valid, |validate| validate(&answer));
                if state.validation.is_valid() {
                    renderer.update(&paint(&state, Status::Done, &answer))?;
                    renderer.finish()?;
                    return Ok(answer);
                }
                debug!("Rejected `{answer}` for `{}`", request.message);
            }
            Step::Cancel => {
                renderer.update(&paint(&state, Status::Cancelled, &state.editor.value()))?;
                renderer.finish()?;
                return Err(Error::Cancelled);
            }
        }

        renderer.update(&paint(&state, Status::Pending, &state.editor.value()))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(state: &mut TextState, text: &str) {
        for c in text.chars() {
            state.handle(InputEvent::Char(c));
        }
    }

    #[test]
    fn test_editing() {
        let mut state = TextState::new(None);
        typed(&mut state, "helo");
        state.handle(InputEvent::Left);
        state.handle(InputEvent::Char('l'));
        state.handle(InputEvent::End);
        state.handle(InputEvent::Paste(" world\n".to_string()));
        assert_eq!(state.editor.value(), "hello world");

        state.handle(InputEvent::Home);
        state.handle(InputEvent::Delete);
        state.handle(InputEvent::Backspace);
        assert_eq!(state.editor.value(), "ello world");
        assert_eq!(state.editor.caret, 0);
    }

    #[test]
    fn test_untouched_default_is_submitted() {
        let mut state = TextState::new(Some("guest".to_string()));
        assert!(matches!(
            state.handle(InputEvent::Enter),
            Step::Submit(answer) if answer == "guest"
        ));
        assert_eq!(state.editor.value(), "guest");
    }

    #[test]
    fn test_first_key_clears_default() {
        let mut state = TextState::new(Some("guest".to_string()));
        state.handle(InputEvent::Char('b'));
        assert!(state.prefill.is_none());
        assert_eq!(state.editor.value(), "b");

        let mut state = TextState::new(Some("guest".to_string()));
        state.handle(InputEvent::Right);
        assert!(state.prefill.is_none());
        assert_eq!(state.editor.value(), "");
        assert!(matches!(
            state.handle(InputEvent::Enter),
            Step::Submit(answer) if answer.is_empty()
        ));
    }

    #[test]
    fn test_typing_clears_validation_message() {
        let mut state = TextState::new(None);
        state.validation = Validity::from("Too short");

        state.handle(InputEvent::Left);
        assert!(!state.validation.is_valid());

        state.handle(InputEvent::Char('x'));
        assert!(state.validation.is_valid());
    }
}
