//! Querent CLI Library
//!
//! This crate provides the terminal side of querent: raw-mode prompts for
//! every question kind, and the `querent` binary that answers a YAML question
//! set.
//!
//! # Key Features
//!
//! - **Interactive Prompts**: Select, multiselect, confirm, text and task
//!   spinner prompts that repaint in place
//! - **Keyboard and Mouse**: Arrow keys, space, `a` to toggle all, `y`/`n`,
//!   clicks and the scroll wheel
//! - **Safe Terminal Handling**: Raw mode and mouse capture are released on
//!   every exit path, including cancellation and errors
//! - **Themes**: Prompt colors can be overridden from the question file
//!
//! # Architecture
//!
//! - [`terminal`]: Frame renderer, input decoding and the raw mode guard
//! - [`interactive`]: Frame builders and one controller per question kind
//! - [`prompter`]: [`prompter::TerminalPrompter`], the terminal implementation
//!   of `querent_core::prompter::Prompter`
//! - [`cli_args`]: Command-line argument parsing for the binary
//!
//! # Examples
//!
//! ```bash
//! # Ask everything the arguments leave open
//! querent -q ~/create-app.yml -- my-app
//!
//! # Answer from arguments only, writing the answers to a file
//! querent -n -q ~/create-app.yml -o answers.yml -- my-app --drink tea
//!
//! # Show the question set's usage
//! querent -q ~/create-app.yml -- --help
//! ```

pub mod cli_args;
pub mod interactive;
pub mod prompter;
pub mod terminal;
