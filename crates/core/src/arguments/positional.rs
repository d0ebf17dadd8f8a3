use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error::{DuplicatePositional, InvalidPositional, RequiredAfterOptional};
use crate::error::{Error, Result};

/// A declared positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    pub name: String,
    pub required: bool,
}

impl FromStr for Positional {
    type Err = Error;

    /// Parses `<name>` as required and `[name]` as optional.
    fn from_str(declaration: &str) -> Result<Self> {
        let (required, inner) = if let Some(inner) = declaration
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        {
            (true, inner)
        } else if let Some(inner) = declaration
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            (false, inner)
        } else {
            return Err(InvalidPositional(declaration.to_string()));
        };

        let name = inner.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(InvalidPositional(declaration.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            required,
        })
    }
}

impl Display for Positional {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.required {
            write!(f, "<{}>", self.name)
        } else {
            write!(f, "[{}]", self.name)
        }
    }
}

/// Parses every declaration and checks their order.
///
/// # Errors
///
/// Returns an error if a declaration is not wrapped in `<>` or `[]`, a name
/// repeats, or a required argument follows an optional one.
pub fn parse_all<S: AsRef<str>>(declarations: &[S]) -> Result<Vec<Positional>> {
    let mut positionals: Vec<Positional> = Vec::with_capacity(declarations.len());
    let mut seen_optional = false;

    for declaration in declarations {
        let positional: Positional = declaration.as_ref().parse()?;

        if positionals.iter().any(|p| p.name == positional.name) {
            return Err(DuplicatePositional(positional.name));
        }

        if positional.required && seen_optional {
            return Err(RequiredAfterOptional(positional.to_string()));
        }
        seen_optional |= !positional.required;

        positionals.push(positional);
    }

    Ok(positionals)
}
