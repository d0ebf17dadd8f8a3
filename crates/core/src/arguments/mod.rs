//! Command-line argument resolution.
//!
//! Arguments reach the engine in two ways:
//! - **Positional arguments**: bound in declared order, declared as
//!   `<name>` (required) or `[name]` (optional)
//! - **Options**: `--key value`, `--key=value`, `-alias value`, `--no-key`
//!
//! Resolution turns the raw tokens into a key → value map. Shape checks and
//! `validate` rules are applied later, per question, by [`validation`].

pub mod options;
pub mod positional;
pub mod processing;
pub mod validation;

pub use options::{option_name, OptionTable};
pub use positional::Positional;
pub use processing::{resolve, ArgValue, ParsedArguments, Request};
