//! Per-session options and the result of a session.

use std::env;
use std::fmt::{Debug, Formatter};
use std::io::{self, Write};

use crate::answers::Answers;
use crate::config;

/// Options for one [`Prompt::show`](crate::prompt::Prompt::show) call.
pub struct SessionOptions {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) version: Option<String>,
    args: Option<Vec<String>>,
    interactive: Option<bool>,
    pub(crate) on_cancel: Option<Box<dyn FnMut()>>,
    pub(crate) output: Box<dyn Write>,
}

impl SessionOptions {
    /// `name` is the program name shown in usage text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            version: None,
            args: None,
            interactive: None,
            on_cancel: None,
            output: Box::new(io::stdout()),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Arguments to resolve instead of the process arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Forces interactive prompting on or off instead of detecting it.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }

    /// Called once when the user cancels a prompt.
    #[must_use]
    pub fn on_cancel<F>(mut self, on_cancel: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_cancel = Some(Box::new(on_cancel));
        self
    }

    /// Where help and version text go. Defaults to stdout.
    #[must_use]
    pub fn output<W>(mut self, output: W) -> Self
    where
        W: Write + 'static,
    {
        self.output = Box::new(output);
        self
    }

    pub(crate) fn arguments(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None => env::args().skip(1).collect(),
        }
    }

    pub(crate) fn is_interactive(&self) -> bool {
        self.interactive.unwrap_or_else(config::detect_interactive)
    }
}

impl Debug for SessionOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOptions")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("version", &self.version)
            .field("args", &self.args)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answered(Answers),
    /// Usage text was written; the program should exit successfully.
    Help,
    /// The version was written; the program should exit successfully.
    Version,
}

impl Outcome {
    pub fn answers(self) -> Option<Answers> {
        match self {
            Self::Answered(answers) => Some(answers),
            Self::Help | Self::Version => None,
        }
    }
}
