//! Command-line argument parsing.
//!
//! The binary's own flags come first. Everything after `--` belongs to the
//! question set and is resolved by the answer engine, so a question named
//! `output` never collides with `--output-path`.

use clap::Parser;

/// Command-line arguments for the querent CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use querent_cli::cli_args::Args;
///
/// let args = Args::parse_from(["querent", "-q", "questions.yml", "--", "Alice"]);
/// assert_eq!(args.arguments, vec!["Alice"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[command(about = "Answer a YAML question set from arguments or interactive prompts")]
pub struct Args {
    /// Path to the question set YAML.
    ///
    /// If not provided, defaults to `~/.querent/questions.yml`.
    #[arg(long, short = 'q')]
    pub questions_path: Option<String>,

    /// Write the answers to this file instead of standard output.
    #[arg(long, short = 'o')]
    pub output_path: Option<String>,

    /// Never prompt; fail on any missing or invalid answer instead.
    ///
    /// Without this flag prompting is still disabled when either end is not
    /// a terminal, when `CI` is set, or when `TERM` is `dumb`.
    #[arg(long, short = 'n', action)]
    pub non_interactive: bool,

    /// Do not capture the mouse while a choice prompt is open.
    #[arg(long, action)]
    pub no_mouse: bool,

    /// Arguments for the question set: positionals, `--key value`, `-h`, `-v`.
    ///
    /// # Examples
    /// ```bash
    /// querent -- my-app --drink tea --no-milk
    /// ```
    #[arg(last = true)]
    pub arguments: Vec<String>,
}
