//! Querent Core Library
//!
//! This crate provides the core functionality for querent, an interactive
//! command-line question engine. A program declares an ordered set of
//! questions and positional arguments; the engine answers each question from
//! the command line when it can and falls back to a live prompt when it
//! cannot.
//!
//! # Key Features
//!
//! - **Question Model**: Text, select, multiselect, confirm and task questions
//!   with validation, defaults and skip rules that can read earlier answers
//! - **Argument Resolution**: Positional arguments, `--key value`, `--key=value`,
//!   aliases, `--no-key` and repeated flags
//! - **Answer Engine**: Per-question reconciliation of arguments, defaults and
//!   interactive prompting behind the [`prompter::Prompter`] trait
//! - **Declarations**: Question sets loaded from YAML, with tasks that run
//!   commands templated from earlier answers
//!
//! # Examples
//!
//! ```
//! use querent_core::prompt::Prompt;
//! use querent_core::prompter::Headless;
//! use querent_core::question::{Choice, Item, Question};
//! use querent_core::session::SessionOptions;
//!
//! let prompt = Prompt::builder()
//!     .positional("<name>")
//!     .question(
//!         "drink",
//!         Item::new(
//!             "Favourite drink",
//!             Question::select("What would you like?")
//!                 .choice(Choice::new("coffee"))
//!                 .choice(Choice::new("tea")),
//!         ),
//!     )
//!     .build()?;
//!
//! let options = SessionOptions::new("order")
//!     .args(["Alice", "--drink", "tea"])
//!     .interactive(false);
//! let answers = prompt.show(options, &mut Headless)?.answers().unwrap_or_default();
//!
//! assert_eq!(answers.text("name"), Some("Alice"));
//! assert_eq!(answers.text("drink"), Some("tea"));
//! # Ok::<(), querent_core::error::Error>(())
//! ```

pub mod answers;
pub mod arguments;
pub mod config;
mod engine;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;
pub mod prompt;
pub mod prompter;
pub mod question;
pub mod question_definitions;
pub mod session;
pub mod task;
pub mod usage;
