//! The seam between the answer engine and an interactive front end.
//!
//! The engine decides *whether* a question needs a live answer; a
//! [`Prompter`] decides *how* to get one. `querent-cli` implements it on a
//! raw-mode terminal. [`Headless`] answers nothing and only runs tasks, for
//! sessions that never prompt.

use crate::answers::{Answer, Answers};
use crate::error::{Error, Result};
use crate::question::{Choice, Validity};
use crate::task::Task;

pub struct TextRequest<'a> {
    pub message: &'a str,
    /// Shown dimmed and accepted verbatim when submitted untouched.
    pub default: Option<String>,
    pub validate: Option<&'a dyn Fn(&str) -> Validity>,
}

pub struct SelectRequest<'a> {
    pub message: &'a str,
    /// Visible choices only; never empty.
    pub choices: Vec<&'a Choice>,
    /// Value the cursor starts on.
    pub default: Option<String>,
    pub validate: Option<&'a dyn Fn(&str) -> Validity>,
}

pub struct MultiSelectRequest<'a> {
    pub message: &'a str,
    pub choices: Vec<&'a Choice>,
    /// Values selected when the prompt opens.
    pub default: Vec<String>,
    pub validate: Option<&'a dyn Fn(&[String]) -> Validity>,
}

pub struct ConfirmRequest<'a> {
    pub message: &'a str,
    pub default: Option<bool>,
    pub validate: Option<&'a dyn Fn(&bool) -> Validity>,
}

pub struct TaskRequest<'a> {
    pub message: &'a str,
    pub task: &'a Task,
    /// Snapshot handed to the task.
    pub answers: Answers,
}

/// Collects answers from a person.
///
/// Every method returns [`Error::Cancelled`] when the user aborts. The
/// engine routes that through the session's cancel callback.
pub trait Prompter {
    fn text(&mut self, request: TextRequest<'_>) -> Result<String>;

    fn select(&mut self, request: SelectRequest<'_>) -> Result<String>;

    fn multiselect(&mut self, request: MultiSelectRequest<'_>) -> Result<Vec<String>>;

    fn confirm(&mut self, request: ConfirmRequest<'_>) -> Result<bool>;

    fn task(&mut self, request: TaskRequest<'_>) -> Result<Answer>;
}

/// A prompter with nobody at the other end.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Prompter for Headless {
    fn text(&mut self, _request: TextRequest<'_>) -> Result<String> {
        Err(Error::InputClosed)
    }

    fn select(&mut self, _request: SelectRequest<'_>) -> Result<String> {
        Err(Error::InputClosed)
    }

    fn multiselect(&mut self, _request: MultiSelectRequest<'_>) -> Result<Vec<String>> {
        Err(Error::InputClosed)
    }

    fn confirm(&mut self, _request: ConfirmRequest<'_>) -> Result<bool> {
        Err(Error::InputClosed)
    }

    fn task(&mut self, request: TaskRequest<'_>) -> Result<Answer> {
        request
            .task
            .run_detached(request.answers)
            .map(|outcome| outcome.value)
    }
}
