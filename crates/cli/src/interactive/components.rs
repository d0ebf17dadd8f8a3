//! Frame builders, one per question kind.
//!
//! These are pure: they turn prompt state into the text of the next frame and
//! never touch the terminal. Every frame starts with a rail line and the
//! question line:
//!
//! ```text
//! │
//! ? What would you like to drink?
//! › ● Coffee
//!     Hot and dark
//!   ○ Tea
//! ```

use crossterm::style::Stylize;
use indexmap::IndexSet;
use itertools::Itertools;
use querent_core::question::{Choice, Validity};

use super::colors::{Status, Theme};

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A painted frame and the frame-relative row of each choice line, for
/// mapping mouse clicks back to choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub choice_rows: Vec<usize>,
}

impl Frame {
    fn plain(lines: Vec<String>) -> Self {
        Self {
            text: lines.join("\n"),
            choice_rows: Vec::new(),
        }
    }

    /// The choice drawn on the given frame row, if any.
    pub fn choice_at(&self, row: usize) -> Option<usize> {
        self.choice_rows.iter().position(|&choice_row| choice_row == row)
    }
}

/// The editable line of a text prompt.
#[derive(Debug, Clone, Copy)]
pub struct TextInput<'a> {
    pub value: &'a str,
    /// Caret position in characters.
    pub caret: usize,
    /// A default still waiting to be accepted or cleared.
    pub prefill: Option<&'a str>,
}

fn header(theme: &Theme, message: &str, status: Status) -> Vec<String> {
    let icon = match status {
        Status::Done => "✔",
        Status::Cancelled => "◼",
        Status::Failed => "✖",
        Status::Pending => "?",
    };

    vec![
        "│".with(theme.border).to_string(),
        format!("{} {}", icon.with(theme.status(status)), message.bold()),
    ]
}

fn answer_line(theme: &Theme, answer: &str) -> String {
    format!("{} {}", "│".with(theme.border), answer.with(theme.hint))
}

/// The message shown under a prompt whose last submission was rejected.
pub fn error(theme: &Theme, validation: &Validity) -> Option<String> {
    let hint = match validation {
        Validity::Valid => return None,
        Validity::Invalid => "Invalid input",
        Validity::Message(message) => message.as_str(),
    };
    Some(hint.with(theme.error).to_string())
}

fn choice_row(
    theme: &Theme,
    status: Status,
    icon: &str,
    choice: &Choice,
    active: bool,
) -> Vec<String> {
    if !active {
        return vec![format!("  {icon} {}", choice.label())];
    }

    let mut lines = vec![format!("{} {icon} {}", "›", choice.label())
        .with(theme.status(status))
        .to_string()];
    if let Some(description) = &choice.description {
        lines.push(format!("    {}", description.as_str().with(theme.hint)));
    }
    lines
}

fn choice_list<F>(
    theme: &Theme,
    message: &str,
    status: Status,
    choices: &[&Choice],
    index: usize,
    validation: &Validity,
    icon: F,
) -> Frame
where
    F: Fn(usize, &Choice) -> &'static str,
{
    let mut lines = header(theme, message, status);
    let mut choice_rows = Vec::with_capacity(choices.len());

    for (i, choice) in choices.iter().enumerate() {
        choice_rows.push(lines.len());
        lines.extend(choice_row(theme, status, icon(i, choice), choice, i == index));
    }
    lines.extend(error(theme, validation));

    Frame {
        text: lines.join("\n"),
        choice_rows,
    }
}

pub fn select(
    theme: &Theme,
    message: &str,
    status: Status,
    choices: &[&Choice],
    index: usize,
    validation: &Validity,
) -> Frame {
    if status != Status::Pending {
        let mut lines = header(theme, message, status);
        if status == Status::Done {
            let answer = choices.get(index).map_or("", |choice| choice.label());
            lines.push(answer_line(theme, answer));
        }
        return Frame::plain(lines);
    }

    choice_list(theme, message, status, choices, index, validation, |i, _| {
        if i == index {
            "●"
        } else {
            "○"
        }
    })
}

pub fn multiselect(
    theme: &Theme,
    message: &str,
    status: Status,
    choices: &[&Choice],
    index: usize,
    selected: &IndexSet<String>,
    validation: &Validity,
) -> Frame {
    if status != Status::Pending {
        let mut lines = header(theme, message, status);
        if status == Status::Done {
            let answer = choices
                .iter()
                .filter(|choice| selected.contains(&choice.value))
                .map(|choice| choice.label())
                .join(", ");
            lines.push(answer_line(theme, &answer));
        }
        return Frame::plain(lines);
    }

    choice_list(theme, message, status, choices, index, validation, |_, choice| {
        if selected.contains(&choice.value) {
            "◼"
        } else {
            "◻"
        }
    })
}

/// A yes/no prompt. `index` 0 is "Yes".
pub fn confirm(
    theme: &Theme,
    message: &str,
    status: Status,
    index: usize,
    validation: &Validity,
) -> Frame {
    let titles = ["Yes", "No"];
    let mut lines = header(theme, message, status);

    match status {
        Status::Done => lines.push(answer_line(theme, titles[index.min(1)])),
        Status::Cancelled | Status::Failed => {}
        Status::Pending => {
            let choices = titles
                .iter()
                .enumerate()
                .map(|(i, &title)| {
                    if i == index {
                        title.with(theme.status(status)).underlined().to_string()
                    } else {
                        title.to_string()
                    }
                })
                .join(&" / ".with(theme.border).to_string());
            lines.push(format!("{} {choices}", "│".with(theme.border)));
            lines.extend(error(theme, validation));
        }
    }

    Frame::plain(lines)
}

fn input_line(theme: &Theme, input: &TextInput<'_>) -> String {
    if let Some(prefill) = input.prefill {
        let mut chars = prefill.chars();
        let first = chars.next().map_or_else(|| " ".to_string(), String::from);
        let rest: String = chars.collect();
        return format!("{}{}", first.with(theme.hint).reverse(), rest.with(theme.hint));
    }

    let before: String = input.value.chars().take(input.caret).collect();
    let mut after = input.value.chars().skip(input.caret);
    let at = after.next().map_or_else(|| " ".to_string(), String::from);
    let rest: String = after.collect();

    format!("{before}{}{rest}", at.reverse())
}

pub fn text(
    theme: &Theme,
    message: &str,
    status: Status,
    input: &TextInput<'_>,
    validation: &Validity,
) -> String {
    let mut lines = header(theme, message, status);

    if status == Status::Pending {
        lines.push(format!(
            "{} {}",
            "│".with(theme.border),
            input_line(theme, input)
        ));
        let corner = "└".with(theme.border);
        lines.push(match error(theme, validation) {
            Some(error) => format!("{corner} {error}"),
            None => corner.to_string(),
        });
    } else {
        lines.push(answer_line(theme, input.value));
    }

    lines.join("\n")
}

/// A running task. `detail` is the answer once done, or the error once
/// failed.
pub fn spinner(
    theme: &Theme,
    counter: usize,
    message: &str,
    status: Status,
    detail: Option<&str>,
) -> String {
    let mut lines = if status == Status::Pending {
        let glyph = SPINNER_FRAMES[counter % SPINNER_FRAMES.len()];
        vec![
            "│".with(theme.border).to_string(),
            format!("{} {}", glyph.with(theme.pending), message.bold()),
        ]
    } else {
        header(theme, message, status)
    };

    match (status, detail) {
        (Status::Done, Some(answer)) => lines.push(answer_line(theme, answer)),
        (Status::Failed, Some(reason)) => lines.push(format!(
            "{} {}",
            "└".with(theme.border),
            reason.with(theme.error)
        )),
        _ => {}
    }

    lines.join("\n")
}
