//! YAML declarations of question sets.
//!
//! A question file names the program, its positional arguments and an
//! ordered map of questions:
//!
//! ```yaml
//! name: create-app
//! description: Scaffold a new application
//! version: 1.0.0
//! theme:
//!   pending:
//!     name: magenta
//! positionals: ["<name>", "[directory]"]
//! questions:
//!   drink:
//!     type: select
//!     message: What would you like to drink?
//!     description: Favourite drink
//!     alias: d
//!     default: tea
//!     choices:
//!       - value: coffee
//!         title: Coffee
//!       - value: tea
//!   greeting:
//!     type: task
//!     message: Greeting
//!     command: ["echo", "Hello {name}"]
//! ```

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::arguments::validation::parse_flag;
use crate::arguments::Positional;
use crate::error::{Error, Result};
use crate::execution;
use crate::interpolation;
use crate::prompt::Prompt;
use crate::question::{Choice, Item, Question};
use crate::task::{Task, TaskOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDefinition {
    Text,
    Select,
    #[serde(alias = "multi-select")]
    MultiSelect,
    Confirm,
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDefinition {
    pub value: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub skip: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    #[serde(rename = "type")]
    pub kind: KindDefinition,
    pub message: String,
    pub description: Option<String>,
    pub alias: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub skip: bool,
    /// Any YAML scalar for text and select questions, a scalar or a sequence
    /// for multiselect, a boolean for confirm.
    pub default: Option<Value>,
    #[serde(default)]
    pub choices: Vec<ChoiceDefinition>,
    /// Task questions only. Arguments may use `{key}` placeholders.
    pub command: Option<Vec<String>>,
    pub working_directory: Option<String>,
    pub environment: Option<HashMap<String, String>>,
}

/// A terminal color given as exactly one of an RGB triple, an ANSI palette
/// index or a color name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDefinition {
    pub rgb: Option<(u8, u8, u8)>,
    pub ansi: Option<u8>,
    pub name: Option<String>,
}

/// Overrides for the prompt colors. Unset entries keep the built-in theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub pending: Option<ColorDefinition>,
    pub done: Option<ColorDefinition>,
    pub cancelled: Option<ColorDefinition>,
    pub hint: Option<ColorDefinition>,
    pub error: Option<ColorDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub theme: Option<ThemeDefinition>,
    #[serde(default)]
    pub positionals: Vec<String>,
    pub questions: IndexMap<String, QuestionDefinition>,
}

fn choices(definitions: &[ChoiceDefinition]) -> Vec<Choice> {
    definitions
        .iter()
        .map(|definition| {
            let mut choice = Choice::new(&definition.value).skip(definition.skip);
            if let Some(title) = &definition.title {
                choice = choice.title(title);
            }
            if let Some(description) = &definition.description {
                choice = choice.description(description);
            }
            choice
        })
        .collect()
}

fn mismatched_default(key: &str, kind: KindDefinition) -> Error {
    Error::invalid_declaration(key, format!("default does not fit a {kind:?} question"))
}

/// Scalars read as the text they were written as, so `default: 3` on a
/// text question means `"3"`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn text_default(key: &str, kind: KindDefinition, value: &Value) -> Result<String> {
    scalar_text(value).ok_or_else(|| mismatched_default(key, kind))
}

fn list_default(key: &str, kind: KindDefinition, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Sequence(values) => values
            .iter()
            .map(|value| text_default(key, kind, value))
            .collect(),
        value => Ok(vec![text_default(key, kind, value)?]),
    }
}

fn flag_default(key: &str, kind: KindDefinition, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => parse_flag(text),
        _ => None,
    }
    .ok_or_else(|| mismatched_default(key, kind))
}

/// Fails when a command placeholder names no positional or earlier question.
fn check_placeholders(key: &str, command: &[String], known: &HashSet<String>) -> Result<()> {
    let templates = interpolation::get_templates(command)?;
    let mut unknown: Vec<String> = interpolation::get_tokens(&templates)
        .into_iter()
        .filter(|token| !known.contains(token))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort();
    let placeholders: Vec<String> = unknown.iter().map(|token| format!("{{{token}}}")).collect();
    Err(Error::invalid_declaration(
        key,
        format!(
            "command refers to {}, which no earlier question or positional provides",
            placeholders.join(", ")
        ),
    ))
}

fn command_task(key: &str, definition: &QuestionDefinition) -> Result<Task> {
    let command = match &definition.command {
        Some(command) if !command.is_empty() => command.clone(),
        _ => return Err(Error::invalid_declaration(key, "a task needs a command")),
    };
    // Reject malformed placeholders up front rather than when the task runs.
    interpolation::get_templates(&command)?;

    let working_directory = definition.working_directory.clone();
    let environment = definition.environment.clone();

    Ok(Task::new(move |context| {
        let templates = interpolation::get_templates(&command)?;
        let values = interpolation::build_answer_context(&context.answers);
        let arguments = interpolation::interpolate_command(&values, &templates)?;

        context
            .progress
            .report(format!("Running `{}`", arguments.join(" ")));
        let output = execution::capture_command(
            &arguments,
            working_directory.as_deref(),
            environment.as_ref(),
        )?;
        Ok(TaskOutcome::new(output))
    }))
}

impl QuestionDefinition {
    /// Builds the question this definition describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the default does not fit the question type, if
    /// choices are given for a question without any, or if a task has no
    /// usable command.
    pub fn to_question(&self, key: &str) -> Result<Question> {
        if !self.choices.is_empty()
            && !matches!(self.kind, KindDefinition::Select | KindDefinition::MultiSelect)
        {
            return Err(Error::invalid_declaration(
                key,
                "only select questions take choices",
            ));
        }

        let question: Question = match self.kind {
            KindDefinition::Text => {
                let mut question = Question::text(&self.message)
                    .required(self.required)
                    .skip(self.skip);
                if let Some(value) = &self.default {
                    question = question.default(text_default(key, self.kind, value)?);
                }
                question.into()
            }
            KindDefinition::Select => {
                let mut question = Question::select(&self.message)
                    .choices(choices(&self.choices))
                    .required(self.required)
                    .skip(self.skip);
                if let Some(value) = &self.default {
                    question = question.default(text_default(key, self.kind, value)?);
                }
                question.into()
            }
            KindDefinition::MultiSelect => {
                let mut question = Question::multiselect(&self.message)
                    .choices(choices(&self.choices))
                    .required(self.required)
                    .skip(self.skip);
                if let Some(value) = &self.default {
                    question = question.default(list_default(key, self.kind, value)?);
                }
                question.into()
            }
            KindDefinition::Confirm => {
                let mut question = Question::confirm(&self.message)
                    .required(self.required)
                    .skip(self.skip);
                if let Some(value) = &self.default {
                    question = question.default(flag_default(key, self.kind, value)?);
                }
                question.into()
            }
            KindDefinition::Task => Question::task(&self.message, command_task(key, self)?).into(),
        };

        Ok(question)
    }
}

impl QuestionFile {
    /// Builds the question set.
    ///
    /// # Errors
    ///
    /// Returns an error if any question definition is invalid or the set as a
    /// whole fails validation.
    pub fn to_prompt(&self) -> Result<Prompt> {
        let mut builder = Prompt::builder();

        // Keys a task command may refer to: positionals and earlier questions.
        let mut known = HashSet::new();
        for positional in &self.positionals {
            if let Ok(parsed) = positional.parse::<Positional>() {
                known.insert(parsed.name);
            }
            builder = builder.positional(positional);
        }

        for (key, definition) in &self.questions {
            if let Some(command) = &definition.command {
                check_placeholders(key, command, &known)?;
            }
            known.insert(key.clone());

            let question = definition.to_question(key)?;
            let description = definition
                .description
                .clone()
                .unwrap_or_else(|| definition.message.clone());
            let mut item = Item::new(description, question);
            if let Some(alias) = &definition.alias {
                item = item.alias(alias);
            }
            builder = builder.question(key, item);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Answer, Answers};
    use crate::question::Kind;

    const YAML: &str = r#"
name: create-app
description: Scaffold a new application
version: 1.0.0
theme:
  pending:
    name: magenta
  hint:
    ansi: 244
positionals: ["<name>", "[directory]"]
questions:
  drink:
    type: select
    message: What would you like to drink?
    alias: d
    default: tea
    choices:
      - value: coffee
        title: Coffee
        description: Hot and dark
      - value: tea
  fruits:
    type: multiselect
    message: Pick fruits
    default: [apple]
    choices:
      - value: apple
      - value: banana
  adult:
    type: confirm
    message: Are you an adult?
    default: false
  greeting:
    type: task
    message: Greeting
    command: ["echo", "Hello {name}"]
"#;

    #[test]
    fn test_parse_question_file() {
        let file: QuestionFile = serde_yaml::from_str(YAML).unwrap();

        assert_eq!(file.name.as_deref(), Some("create-app"));
        assert_eq!(file.positionals, vec!["<name>", "[directory]"]);
        let theme = file.theme.as_ref().unwrap();
        assert_eq!(
            theme.pending.as_ref().and_then(|color| color.name.as_deref()),
            Some("magenta")
        );
        assert_eq!(theme.hint.as_ref().and_then(|color| color.ansi), Some(244));
        assert!(theme.done.is_none());
        assert_eq!(
            file.questions.keys().collect::<Vec<_>>(),
            vec!["drink", "fruits", "adult", "greeting"]
        );
        assert_eq!(file.questions["drink"].kind, KindDefinition::Select);
        assert_eq!(file.questions["adult"].default, Some(Value::Bool(false)));
    }

    #[test]
    fn test_to_prompt() {
        let file: QuestionFile = serde_yaml::from_str(YAML).unwrap();
        let prompt = file.to_prompt().unwrap();

        let kinds: Vec<Kind> = prompt
            .items()
            .filter_map(|(_, item)| item.static_question().map(Question::kind))
            .collect();
        assert_eq!(
            kinds,
            vec![Kind::Select, Kind::MultiSelect, Kind::Confirm, Kind::Task]
        );
        assert_eq!(prompt.options().lookup("d"), Some("drink"));
        assert_eq!(prompt.options().lookup("greeting"), None);
    }

    #[test]
    fn test_mismatched_default() {
        let yaml = r#"
questions:
  adult:
    type: confirm
    message: Adult?
    default: maybe
"#;
        let file: QuestionFile = serde_yaml::from_str(yaml).unwrap();
        let result = file.to_prompt();
        assert!(matches!(result, Err(Error::InvalidDeclaration { key, .. }) if key == "adult"));
    }

    #[test]
    fn test_scalar_defaults_read_as_text() {
        let yaml = r#"
questions:
  port:
    type: text
    message: Port?
    default: 8080
  enabled:
    type: text
    message: Enabled?
    default: true
  size:
    type: select
    message: Size?
    default: 2
    choices:
      - value: "1"
      - value: "2"
  sizes:
    type: multiselect
    message: Sizes?
    default: [1, 2]
    choices:
      - value: "1"
      - value: "2"
  adult:
    type: confirm
    message: Adult?
    default: "yes"
"#;
        let file: QuestionFile = serde_yaml::from_str(yaml).unwrap();
        let answers = Answers::default();
        let question = |key: &str| file.questions[key].to_question(key).unwrap();

        assert_eq!(
            question("port").default_answer(&answers),
            Some(Answer::from("8080"))
        );
        assert_eq!(
            question("enabled").default_answer(&answers),
            Some(Answer::from("true"))
        );
        assert_eq!(
            question("size").default_answer(&answers),
            Some(Answer::from("2"))
        );
        assert_eq!(
            question("sizes").default_answer(&answers),
            Some(Answer::List(vec!["1".to_string(), "2".to_string()]))
        );
        assert_eq!(
            question("adult").default_answer(&answers),
            Some(Answer::Flag(true))
        );
    }

    #[test]
    fn test_structured_default_on_text_is_rejected() {
        let yaml = r#"
questions:
  name:
    type: text
    message: Name?
    default: [alice]
"#;
        let file: QuestionFile = serde_yaml::from_str(yaml).unwrap();
        let result = file.to_prompt();
        assert!(matches!(result, Err(Error::InvalidDeclaration { key, .. }) if key == "name"));
    }

    #[test]
    fn test_task_placeholders_must_be_known() {
        let yaml = r#"
positionals: ["<name>"]
questions:
  install:
    type: task
    message: Installing
    command: ["npm", "install", "{name}", "{manager}"]
  manager:
    type: select
    message: Package manager?
    choices:
      - value: npm
"#;
        let file: QuestionFile = serde_yaml::from_str(yaml).unwrap();
        let Err(error) = file.to_prompt() else {
            panic!("expected a declaration error");
        };
        assert_eq!(
            error.to_string(),
            "Invalid declaration of question 'install': command refers to {manager}, \
             which no earlier question or positional provides"
        );
    }

    #[test]
    fn test_task_requires_command() {
        let yaml = r#"
questions:
  install:
    type: task
    message: Installing
"#;
        let file: QuestionFile = serde_yaml::from_str(yaml).unwrap();
        assert!(file.to_prompt().is_err());
    }

    #[test]
    fn test_choices_only_on_selects() {
        let yaml = r#"
questions:
  name:
    type: text
    message: Name?
    choices:
      - value: alice
"#;
        let file: QuestionFile = serde_yaml::from_str(yaml).unwrap();
        assert!(file.to_prompt().is_err());
    }
}
