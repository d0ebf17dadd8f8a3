use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad grouping of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The question set itself is malformed. Raised while building it.
    Configuration,
    /// The command-line tokens could not be parsed.
    Parse,
    /// A supplied or missing value does not satisfy its question.
    Validation,
    /// The user aborted, or input ended before an answer was given.
    Cancellation,
    /// A task, template or IO operation failed at runtime.
    Runtime,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Argument must be wrapped in [] or <> (got {})", .0)]
    InvalidPositional(String),

    #[error("Required argument '{}' cannot appear after optional arguments", .0)]
    RequiredAfterOptional(String),

    #[error("Argument '{}' is declared more than once", .0)]
    DuplicatePositional(String),

    #[error("Question '{}' is declared more than once", .0)]
    DuplicateQuestion(String),

    #[error("Alias '-{}' of question '{}' is already in use", .alias, .key)]
    DuplicateAlias { alias: String, key: String },

    #[error("Alias '-{}' is reserved for the startup options", .0)]
    ReservedAlias(String),

    #[error("Question '{}' has no choices to select from", .0)]
    NoChoices(String),

    #[error("Invalid declaration of question '{}': {}", .key, .reason)]
    InvalidDeclaration { key: String, reason: String },

    #[error("Unknown option '{}'", .0)]
    UnknownOption(String),

    #[error("Unexpected argument '{}'", .0)]
    UnexpectedArgument(String),

    #[error("Duplicate argument '{}'", .0)]
    DuplicateArgument(String),

    #[error("Option '{} <value>' argument missing", .0)]
    MissingValue(String),

    #[error("Missing required argument '{}'", .0)]
    MissingPositional(String),

    #[error("Invalid value for option '{}'{}", .option, reason_suffix(.reason))]
    InvalidValue {
        option: String,
        reason: Option<String>,
    },

    #[error("Missing required option '{}'. Provide a value using {}", .0, .0)]
    MissingRequired(String),

    #[error("User cancelled the prompt")]
    Cancelled,

    #[error("Input closed before the question was answered")]
    InputClosed,

    #[error("Task failed: {}", .0)]
    Task(String),

    #[error("Only one of rgb, ansi or name may be set on a color")]
    MultipleColorTypes,

    #[error("Unknown color name '{}'", .0)]
    UnknownColorName(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    File {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing placeholder string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering placeholder template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("IO error: {}", .0)]
    Io(#[from] std::io::Error),
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(". {reason}"),
        None => String::new(),
    }
}

impl Error {
    pub fn invalid_value(option: &str, reason: Option<String>) -> Self {
        Self::InvalidValue {
            option: option.to_string(),
            reason,
        }
    }

    pub fn invalid_declaration(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn file_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::File {
            file_description,
            path,
            original,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPositional(_)
            | Self::RequiredAfterOptional(_)
            | Self::DuplicatePositional(_)
            | Self::DuplicateQuestion(_)
            | Self::DuplicateAlias { .. }
            | Self::ReservedAlias(_)
            | Self::NoChoices(_)
            | Self::InvalidDeclaration { .. }
            | Self::MultipleColorTypes
            | Self::UnknownColorName(_)
            | Self::Yaml { .. }
            | Self::File { .. } => ErrorKind::Configuration,
            Self::UnknownOption(_)
            | Self::UnexpectedArgument(_)
            | Self::DuplicateArgument(_)
            | Self::MissingValue(_)
            | Self::MissingPositional(_) => ErrorKind::Parse,
            Self::InvalidValue { .. } | Self::MissingRequired(_) => ErrorKind::Validation,
            Self::Cancelled | Self::InputClosed => ErrorKind::Cancellation,
            Self::Task(_) | Self::Parse(_) | Self::Render(_) | Self::Io(_) => ErrorKind::Runtime,
        }
    }

    /// Process exit status for a session that ended with this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Cancelled => 130,
            _ => 1,
        }
    }
}
