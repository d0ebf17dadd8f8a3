//! Configuration path utilities and environment detection.
//!
//! This module resolves the question file path (expanding shell variables
//! like `~`) and decides whether a session may prompt interactively.

use std::env;
use std::io::{self, IsTerminal};

/// Default path for the question set declaration file
const DEFAULT_QUESTIONS_PATH: &str = "~/.querent/questions.yml";

/// Resolves the question file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// question file path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use querent_core::config::get_questions_path;
///
/// // Use default path
/// let default_path = get_questions_path(&None);
///
/// // Use custom path
/// let custom_path = get_questions_path(&Some("/path/to/questions.yml".to_string()));
/// ```
pub fn get_questions_path(questions_path_arg: &Option<String>) -> String {
    let questions_path = match questions_path_arg {
        Some(questions_path) => questions_path,
        None => DEFAULT_QUESTIONS_PATH,
    };

    shellexpand::tilde(questions_path).to_string()
}

/// Resolves where answers are written, expanding `~`.
pub fn get_output_path(output_path: &str) -> String {
    shellexpand::tilde(output_path).to_string()
}

/// Expands shell variables in a working directory path.
///
/// Returns None if no working directory is provided.
pub fn expand_working_directory(working_directory: Option<&str>) -> Option<String> {
    working_directory.map(|directory| shellexpand::tilde(directory).to_string())
}

/// Whether the environment variable marks a CI run.
fn is_ci(ci: Option<&str>) -> bool {
    match ci {
        Some(value) => !matches!(value.trim(), "" | "0" | "false"),
        None => false,
    }
}

/// Decides interactivity from already-gathered facts.
///
/// Prompting needs a terminal on both ends, and is turned off on CI and on
/// dumb terminals.
pub fn interactive_from(
    stdin_is_terminal: bool,
    stdout_is_terminal: bool,
    ci: Option<&str>,
    term: Option<&str>,
) -> bool {
    stdin_is_terminal && stdout_is_terminal && !is_ci(ci) && term != Some("dumb")
}

/// Decides interactivity for the current process.
pub fn detect_interactive() -> bool {
    let ci = env::var("CI").ok();
    let term = env::var("TERM").ok();

    interactive_from(
        io::stdin().is_terminal(),
        io::stdout().is_terminal(),
        ci.as_deref(),
        term.as_deref(),
    )
}
