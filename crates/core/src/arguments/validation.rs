use crate::answers::{Answer, Answers};
use crate::arguments::processing::ArgValue;
use crate::error::Error::{MissingValue, UnknownOption};
use crate::error::{Error, Result};
use crate::question::{Choice, Question, Validity};

fn quote_all<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn check(option: &str, validity: Validity) -> Result<()> {
    match validity {
        Validity::Valid => Ok(()),
        Validity::Invalid => Err(Error::invalid_value(option, None)),
        Validity::Message(message) => Err(Error::invalid_value(option, Some(message))),
    }
}

fn ensure_members(option: &str, choices: &[&Choice], given: &[String]) -> Result<()> {
    if given
        .iter()
        .all(|value| choices.iter().any(|choice| &choice.value == value))
    {
        return Ok(());
    }

    let expected = quote_all(choices.iter().map(|choice| choice.value.as_str()));
    Err(Error::invalid_value(
        option,
        Some(format!(
            "Expected one of {expected}, got '{}'",
            given.join(", ")
        )),
    ))
}

/// Parses the textual forms a boolean may take on the command line.
pub fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Checks a command-line value against its question and turns it into an
/// answer.
///
/// The value's shape must fit the question kind: text and select want a
/// string, select values must be among the visible choices, multiselect
/// wants a subset of them, confirm wants a boolean. The question's
/// `validate` rule runs last.
///
/// # Errors
///
/// Returns a validation error naming `option` when the value does not fit,
/// or [`MissingValue`] when a value-taking option was given as a bare flag.
pub fn accept(
    question: &Question,
    option: &str,
    value: ArgValue,
    answers: &Answers,
) -> Result<Answer> {
    match question {
        Question::Text(text) => {
            let ArgValue::Text(value) = value else {
                return Err(MissingValue(option.to_string()));
            };
            if value.is_empty() && text.rules().required {
                return Err(Error::invalid_value(
                    option,
                    Some("Got empty string".to_string()),
                ));
            }
            check(option, text.rules().check(&value))?;
            Ok(Answer::Text(value))
        }
        Question::Select(select) => {
            let ArgValue::Text(value) = value else {
                return Err(MissingValue(option.to_string()));
            };
            let choices = select.visible_choices(answers);
            ensure_members(option, &choices, std::slice::from_ref(&value))?;
            check(option, select.rules().check(&value))?;
            Ok(Answer::Text(value))
        }
        Question::MultiSelect(multi) => {
            let values = match value {
                ArgValue::List(values) => values,
                ArgValue::Text(value) => vec![value],
                ArgValue::Flag(_) => return Err(MissingValue(option.to_string())),
            };
            let choices = multi.visible_choices(answers);
            ensure_members(option, &choices, &values)?;
            check(option, multi.rules().check(&values))?;
            Ok(Answer::List(values))
        }
        Question::Confirm(confirm) => {
            let flag = match value {
                ArgValue::Flag(flag) => flag,
                ArgValue::Text(text) => parse_flag(&text).ok_or_else(|| {
                    Error::invalid_value(option, Some(format!("Expected a boolean, got '{text}'")))
                })?,
                ArgValue::List(_) => {
                    return Err(Error::invalid_value(
                        option,
                        Some("Expected a single boolean".to_string()),
                    ))
                }
            };
            check(option, confirm.rules().check(&flag))?;
            Ok(Answer::Flag(flag))
        }
        Question::Task(_) => Err(UnknownOption(option.to_string())),
    }
}
