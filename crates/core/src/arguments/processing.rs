use indexmap::IndexMap;
use log::debug;

use crate::arguments::options::OptionTable;
use crate::arguments::positional::Positional;
use crate::error::Error::{DuplicateArgument, MissingPositional, UnexpectedArgument, UnknownOption};
use crate::error::{Error, Result};

/// A raw value taken from the command line, before any shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

/// A startup option that replaces the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Help,
    Version,
}

/// One appearance of a key on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Occurrence {
    /// The flag as written, for messages.
    flag: String,
    value: ArgValue,
}

/// Outcome of [`resolve`].
///
/// Every value given for a key is kept in encounter order. Whether repeats
/// accumulate or clash is settled by [`ParsedArguments::take`], once the
/// caller knows the question behind the key.
///
/// Problems that belong to a single key (a missing required positional) are
/// kept per key in `rejected`, so an interactive session can prompt for that
/// key instead of failing.
#[derive(Debug, Default)]
pub struct ParsedArguments {
    values: IndexMap<String, Vec<Occurrence>>,
    rejected: IndexMap<String, Error>,
    request: Option<Request>,
}

impl ParsedArguments {
    /// Removes the values given for `key` and folds them into one.
    ///
    /// With `multiple`, text values accumulate into a list in encounter
    /// order and an empty value (`--key=`) adds nothing. Otherwise, or when a
    /// bare flag is mixed in, a second occurrence is a [`DuplicateArgument`].
    pub fn take(&mut self, key: &str, multiple: bool) -> Option<Result<ArgValue>> {
        let mut occurrences = self.values.shift_remove(key)?.into_iter();
        let first = occurrences.next()?;

        let mut folded = match first.value {
            ArgValue::Text(text) if multiple => ArgValue::List(list_from(text)),
            value => value,
        };

        for Occurrence { flag, value } in occurrences {
            match (&mut folded, value) {
                (ArgValue::List(values), ArgValue::Text(text)) if multiple => {
                    values.extend(list_from(text));
                }
                _ => return Some(Err(DuplicateArgument(flag))),
            }
        }

        Some(Ok(folded))
    }

    /// Drops whatever was given for `key`. Returns whether anything was.
    pub fn discard(&mut self, key: &str) -> bool {
        self.values.shift_remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn take_rejected(&mut self, key: &str) -> Option<Error> {
        self.rejected.shift_remove(key)
    }

    pub fn rejected(&self, key: &str) -> Option<&Error> {
        self.rejected.get(key)
    }

    pub fn request(&self) -> Option<Request> {
        self.request
    }

    fn push(&mut self, key: &str, flag: &str, value: ArgValue) {
        self.values
            .entry(key.to_string())
            .or_default()
            .push(Occurrence {
                flag: flag.to_string(),
                value,
            });
    }
}

/// `--fruits=` yields an empty list rather than a list holding `""`.
fn list_from(text: String) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text]
    }
}

fn is_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Splits `--key=value` into the name without dashes, the flag as written
/// (for messages) and the inline value.
fn split_option(token: &str) -> (&str, &str, Option<&str>) {
    let (flag, inline) = match token.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (token, None),
    };
    (flag.trim_start_matches('-'), flag, inline)
}

fn find_request(args: &[String]) -> Option<Request> {
    args.iter().find_map(|arg| match arg.as_str() {
        "-h" | "--help" => Some(Request::Help),
        "-v" | "--version" => Some(Request::Version),
        _ => None,
    })
}

/// Resolves command-line tokens against the declared positionals and options.
///
/// Tokens before the first option bind to positionals in order. After that,
/// every token must be an option or the value consumed by the option before
/// it: a bare `--key` or `-alias` takes the next token unless there is none
/// or it is itself an option, in which case the value is `Flag(true)`.
///
/// # Errors
///
/// Returns an error for unknown options and for tokens that fit nowhere.
/// Problems tied to a single key are recorded on the result instead.
pub fn resolve(
    positionals: &[Positional],
    table: &OptionTable,
    args: &[String],
) -> Result<ParsedArguments> {
    let mut parsed = ParsedArguments::default();

    if let Some(request) = find_request(args) {
        debug!("Startup option {request:?} requested");
        parsed.request = Some(request);
        return Ok(parsed);
    }

    let split = args
        .iter()
        .position(|arg| is_option(arg))
        .unwrap_or(args.len());
    let (bound, rest) = args.split_at(split);

    for (index, token) in bound.iter().enumerate() {
        let Some(positional) = positionals.get(index) else {
            return Err(UnexpectedArgument(token.clone()));
        };
        parsed.push(&positional.name, token, ArgValue::Text(token.clone()));
    }

    let mut tokens = rest.iter().peekable();
    while let Some(token) = tokens.next() {
        if !is_option(token) {
            return Err(UnexpectedArgument(token.clone()));
        }

        let (name, flag, inline) = split_option(token);

        let (key, value) = if let Some(inline) = inline {
            let key = table
                .lookup(name)
                .ok_or_else(|| UnknownOption(flag.to_string()))?;
            (key, ArgValue::Text(inline.to_string()))
        } else if let Some(key) = table.lookup(name) {
            let value = match tokens.next_if(|next| !is_option(next)) {
                Some(value) => ArgValue::Text(value.clone()),
                None => ArgValue::Flag(true),
            };
            (key, value)
        } else if let Some(key) = name.strip_prefix("no-").and_then(|name| table.lookup(name)) {
            (key, ArgValue::Flag(false))
        } else {
            return Err(UnknownOption(flag.to_string()));
        };

        parsed.push(key, flag, value);
    }

    for positional in positionals.iter().filter(|p| p.required) {
        if !parsed.contains(&positional.name) {
            parsed.rejected.insert(
                positional.name.clone(),
                MissingPositional(positional.to_string()),
            );
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::positional::parse_all;
    use crate::question::{Choice, Item, Question};

    fn table() -> OptionTable {
        let mut items = IndexMap::new();
        items.insert(
            "userName".to_string(),
            Item::new("Name", Question::text("Name?")).alias("u"),
        );
        items.insert(
            "fruits".to_string(),
            Item::new(
                "Fruits",
                Question::multiselect("Fruits?")
                    .choice(Choice::new("apple"))
                    .choice(Choice::new("banana")),
            ),
        );
        items.insert(
            "adult".to_string(),
            Item::new("Adult", Question::confirm("Adult?")),
        );
        OptionTable::build(&items).unwrap()
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    /// Folds a key the way the engine does for these questions.
    fn value(parsed: &mut ParsedArguments, key: &str) -> Option<ArgValue> {
        parsed.take(key, key == "fruits").map(|value| value.unwrap())
    }

    #[test]
    fn test_option_forms() {
        let mut parsed = resolve(
            &[],
            &table(),
            &args(&["--user-name", "alice", "--adult"]),
        )
        .unwrap();
        assert_eq!(
            value(&mut parsed, "userName"),
            Some(ArgValue::Text("alice".to_string()))
        );
        assert_eq!(value(&mut parsed, "adult"), Some(ArgValue::Flag(true)));

        let mut parsed = resolve(&[], &table(), &args(&["-u=bob", "--no-adult"])).unwrap();
        assert_eq!(
            value(&mut parsed, "userName"),
            Some(ArgValue::Text("bob".to_string()))
        );
        assert_eq!(value(&mut parsed, "adult"), Some(ArgValue::Flag(false)));
    }

    #[test]
    fn test_inline_value_keeps_later_equals_signs() {
        let mut parsed = resolve(&[], &table(), &args(&["--userName=a=b"])).unwrap();
        assert_eq!(
            value(&mut parsed, "userName"),
            Some(ArgValue::Text("a=b".to_string()))
        );
    }

    #[test]
    fn test_empty_inline_values() {
        let mut parsed = resolve(&[], &table(), &args(&["--userName=", "--fruits="])).unwrap();
        assert_eq!(
            value(&mut parsed, "userName"),
            Some(ArgValue::Text(String::new()))
        );
        assert_eq!(value(&mut parsed, "fruits"), Some(ArgValue::List(vec![])));
    }

    #[test]
    fn test_repeated_multi_values_accumulate() {
        let mut parsed = resolve(
            &[],
            &table(),
            &args(&["--fruits", "apple", "--fruits=banana"]),
        )
        .unwrap();
        assert_eq!(
            value(&mut parsed, "fruits"),
            Some(ArgValue::List(vec![
                "apple".to_string(),
                "banana".to_string()
            ]))
        );
    }

    #[test]
    fn test_repeated_single_value_is_rejected_per_key() {
        let mut parsed = resolve(
            &[],
            &table(),
            &args(&["--userName", "alice", "-u", "bob", "--adult"]),
        )
        .unwrap();
        let error = parsed.take("userName", false).unwrap().unwrap_err();
        assert_eq!(error.to_string(), "Duplicate argument '-u'");
        assert!(!parsed.contains("userName"));
        assert_eq!(value(&mut parsed, "adult"), Some(ArgValue::Flag(true)));
    }

    #[test]
    fn test_repeats_fold_by_the_kind_asked_for() {
        let tokens = args(&["--fruits", "apple", "--fruits", "banana"]);

        let mut parsed = resolve(&[], &table(), &tokens).unwrap();
        assert_eq!(
            parsed.take("fruits", true).unwrap().unwrap(),
            ArgValue::List(vec!["apple".to_string(), "banana".to_string()])
        );

        let mut parsed = resolve(&[], &table(), &tokens).unwrap();
        assert!(matches!(
            parsed.take("fruits", false),
            Some(Err(DuplicateArgument(flag))) if flag == "--fruits"
        ));

        // A bare flag cannot join a list.
        let tokens = args(&["--fruits", "apple", "--fruits"]);
        let mut parsed = resolve(&[], &table(), &tokens).unwrap();
        assert!(matches!(
            parsed.take("fruits", true),
            Some(Err(DuplicateArgument(_)))
        ));

        assert!(parsed.take("fruits", true).is_none());
    }

    #[test]
    fn test_flag_followed_by_option_has_no_value() {
        let mut parsed = resolve(&[], &table(), &args(&["--userName", "--adult"])).unwrap();
        assert_eq!(value(&mut parsed, "userName"), Some(ArgValue::Flag(true)));
        assert_eq!(value(&mut parsed, "adult"), Some(ArgValue::Flag(true)));
    }

    #[test]
    fn test_unknown_options() {
        let error = resolve(&[], &table(), &args(&["-x"])).unwrap_err();
        assert_eq!(error.to_string(), "Unknown option '-x'");

        let error = resolve(&[], &table(), &args(&["--extra=1"])).unwrap_err();
        assert_eq!(error.to_string(), "Unknown option '--extra'");
    }

    #[test]
    fn test_positionals_bind_in_order() {
        let positionals = parse_all(&["<name>", "[directory]"]).unwrap();
        let mut parsed = resolve(
            &positionals,
            &table(),
            &args(&["my-app", "./apps", "--adult"]),
        )
        .unwrap();
        assert_eq!(
            value(&mut parsed, "name"),
            Some(ArgValue::Text("my-app".to_string()))
        );
        assert_eq!(
            value(&mut parsed, "directory"),
            Some(ArgValue::Text("./apps".to_string()))
        );
    }

    #[test]
    fn test_missing_optional_positional_is_absent() {
        let positionals = parse_all(&["<name>", "[directory]"]).unwrap();
        let mut parsed = resolve(&positionals, &table(), &args(&["my-app"])).unwrap();
        assert!(value(&mut parsed, "directory").is_none());
        assert!(parsed.rejected("directory").is_none());
        assert_eq!(
            value(&mut parsed, "name"),
            Some(ArgValue::Text("my-app".to_string()))
        );
    }

    #[test]
    fn test_missing_required_positional() {
        let positionals = parse_all(&["<name>"]).unwrap();
        let parsed = resolve(&positionals, &table(), &args(&["--adult"])).unwrap();
        assert_eq!(
            parsed.rejected("name").map(ToString::to_string),
            Some("Missing required argument '<name>'".to_string())
        );
    }

    #[test]
    fn test_unexpected_tokens() {
        let positionals = parse_all(&["<name>"]).unwrap();
        let error = resolve(&positionals, &table(), &args(&["a", "b"])).unwrap_err();
        assert_eq!(error.to_string(), "Unexpected argument 'b'");

        let error = resolve(&[], &table(), &args(&["--adult=true", "stray"])).unwrap_err();
        assert!(matches!(error, UnexpectedArgument(token) if token == "stray"));
    }

    #[test]
    fn test_help_and_version_short_circuit() {
        let parsed = resolve(&[], &table(), &args(&["--bogus", "--help"])).unwrap();
        assert_eq!(parsed.request(), Some(Request::Help));

        let parsed = resolve(&[], &table(), &args(&["-v"])).unwrap();
        assert_eq!(parsed.request(), Some(Request::Version));
    }
}
