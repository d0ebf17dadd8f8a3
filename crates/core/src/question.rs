//! Declarative question model.
//!
//! A question set is an ordered list of [`Item`]s. Each item is either a
//! static [`Question`] or a closure that builds one from the answers given so
//! far. Rules that depend on earlier answers (defaults, skip conditions,
//! choice visibility) are closures over [`Answers`], evaluated when the
//! question is reached.

use std::fmt::{Display, Formatter};

use crate::answers::Answers;
use crate::task::Task;

/// Result of a `validate` rule.
///
/// Converts from `bool` and from a message, so validators can return
/// whichever reads best.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Valid,
    /// Rejected without an explanation.
    Invalid,
    /// Rejected with a message shown to the user.
    Message(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            _ => None,
        }
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

impl From<String> for Validity {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for Validity {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl<E: Into<String>> From<std::result::Result<(), E>> for Validity {
    fn from(result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(message) => Self::Message(message.into()),
        }
    }
}

/// Whether a question (or a choice) is left out.
#[derive(Default)]
pub enum Skip {
    #[default]
    Never,
    Always,
    When(Box<dyn Fn(&Answers) -> bool>),
}

impl Skip {
    pub fn evaluate(&self, answers: &Answers) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::When(condition) => condition(answers),
        }
    }
}

impl From<bool> for Skip {
    fn from(skip: bool) -> Self {
        if skip {
            Self::Always
        } else {
            Self::Never
        }
    }
}

/// A default that is either fixed or computed from earlier answers.
pub enum DefaultValue<T> {
    Value(T),
    Computed(Box<dyn Fn(&Answers) -> Option<T>>),
}

impl<T: Clone> DefaultValue<T> {
    pub fn resolve(&self, answers: &Answers) -> Option<T> {
        match self {
            Self::Value(value) => Some(value.clone()),
            Self::Computed(compute) => compute(answers),
        }
    }

    /// The fixed value, if the default does not depend on other answers.
    pub fn fixed(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Computed(_) => None,
        }
    }
}

/// Rules shared by every answerable question kind.
pub struct Rules<T, V: ?Sized> {
    pub(crate) validate: Option<Box<dyn Fn(&V) -> Validity>>,
    pub(crate) default: Option<DefaultValue<T>>,
    pub(crate) skip: Skip,
    pub(crate) required: bool,
}

impl<T, V: ?Sized> Default for Rules<T, V> {
    fn default() -> Self {
        Self {
            validate: None,
            default: None,
            skip: Skip::Never,
            required: false,
        }
    }
}

impl<T: Clone, V: ?Sized> Rules<T, V> {
    pub fn check(&self, value: &V) -> Validity {
        match &self.validate {
            Some(validate) => validate(value),
            None => Validity::Valid,
        }
    }

    pub fn validator(&self) -> Option<&dyn Fn(&V) -> Validity> {
        self.validate.as_deref()
    }

    pub fn default_value(&self, answers: &Answers) -> Option<T> {
        self.default.as_ref().and_then(|default| default.resolve(answers))
    }

    pub fn fixed_default(&self) -> Option<&T> {
        self.default.as_ref().and_then(DefaultValue::fixed)
    }
}

macro_rules! rule_builders {
    ($question:ty, $value:ty, $input:ty) => {
        impl $question {
            /// Rejects answers the closure does not accept.
            #[must_use]
            pub fn validate<F, R>(mut self, validate: F) -> Self
            where
                F: Fn(&$input) -> R + 'static,
                R: Into<Validity>,
            {
                self.rules.validate = Some(Box::new(move |value: &$input| validate(value).into()));
                self
            }

            /// Computes the default from earlier answers when the question is reached.
            #[must_use]
            pub fn default_with<F>(mut self, compute: F) -> Self
            where
                F: Fn(&Answers) -> Option<$value> + 'static,
            {
                self.rules.default = Some(DefaultValue::Computed(Box::new(compute)));
                self
            }

            #[must_use]
            pub fn skip(mut self, skip: bool) -> Self {
                self.rules.skip = Skip::from(skip);
                self
            }

            #[must_use]
            pub fn skip_when<F>(mut self, condition: F) -> Self
            where
                F: Fn(&Answers) -> bool + 'static,
            {
                self.rules.skip = Skip::When(Box::new(condition));
                self
            }

            /// Required questions must be answered from the command line when
            /// the session is not interactive, even if they declare a default.
            #[must_use]
            pub fn required(mut self, required: bool) -> Self {
                self.rules.required = required;
                self
            }

            pub fn rules(&self) -> &Rules<$value, $input> {
                &self.rules
            }
        }
    };
}

/// A selectable option of a select or multiselect question.
pub struct Choice {
    pub value: String,
    pub title: Option<String>,
    pub description: Option<String>,
    skip: Skip,
}

impl Choice {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            title: None,
            description: None,
            skip: Skip::Never,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = Skip::from(skip);
        self
    }

    #[must_use]
    pub fn skip_when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Answers) -> bool + 'static,
    {
        self.skip = Skip::When(Box::new(condition));
        self
    }

    /// Title if one was given, the value otherwise.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.value)
    }

    pub fn is_skipped(&self, answers: &Answers) -> bool {
        self.skip.evaluate(answers)
    }
}

fn visible<'a>(choices: &'a [Choice], answers: &Answers) -> Vec<&'a Choice> {
    choices
        .iter()
        .filter(|choice| !choice.is_skipped(answers))
        .collect()
}

pub struct TextQuestion {
    pub message: String,
    rules: Rules<String, str>,
}

impl TextQuestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rules: Rules::default(),
        }
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.rules.default = Some(DefaultValue::Value(value.into()));
        self
    }
}

rule_builders!(TextQuestion, String, str);

pub struct SelectQuestion {
    pub message: String,
    choices: Vec<Choice>,
    rules: Rules<String, str>,
}

impl SelectQuestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            choices: Vec::new(),
            rules: Rules::default(),
        }
    }

    #[must_use]
    pub fn choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    #[must_use]
    pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices.extend(choices);
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.rules.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn all_choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn visible_choices(&self, answers: &Answers) -> Vec<&Choice> {
        visible(&self.choices, answers)
    }
}

rule_builders!(SelectQuestion, String, str);

pub struct MultiSelectQuestion {
    pub message: String,
    choices: Vec<Choice>,
    rules: Rules<Vec<String>, [String]>,
}

impl MultiSelectQuestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            choices: Vec::new(),
            rules: Rules::default(),
        }
    }

    #[must_use]
    pub fn choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    #[must_use]
    pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices.extend(choices);
        self
    }

    #[must_use]
    pub fn default<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.rules.default = Some(DefaultValue::Value(values));
        self
    }

    pub fn all_choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn visible_choices(&self, answers: &Answers) -> Vec<&Choice> {
        visible(&self.choices, answers)
    }
}

rule_builders!(MultiSelectQuestion, Vec<String>, [String]);

pub struct ConfirmQuestion {
    pub message: String,
    rules: Rules<bool, bool>,
}

impl ConfirmQuestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rules: Rules::default(),
        }
    }

    #[must_use]
    pub fn default(mut self, value: bool) -> Self {
        self.rules.default = Some(DefaultValue::Value(value));
        self
    }
}

rule_builders!(ConfirmQuestion, bool, bool);

/// A unit of work shown with a spinner. Tasks always run; they take no
/// command-line value and ignore interactivity.
pub struct TaskQuestion {
    pub message: String,
    pub task: Task,
}

impl TaskQuestion {
    pub fn new(message: impl Into<String>, task: Task) -> Self {
        Self {
            message: message.into(),
            task,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Select,
    MultiSelect,
    Confirm,
    Task,
}

impl Kind {
    /// Type shown in usage text.
    pub fn type_label(self) -> Option<&'static str> {
        match self {
            Self::Text | Self::Select => Some("string"),
            Self::MultiSelect => Some("array"),
            Self::Confirm => Some("boolean"),
            Self::Task => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Confirm => "confirm",
            Self::Task => "task",
        };
        write!(f, "{name}")
    }
}

pub enum Question {
    Text(TextQuestion),
    Select(SelectQuestion),
    MultiSelect(MultiSelectQuestion),
    Confirm(ConfirmQuestion),
    Task(TaskQuestion),
}

impl Question {
    pub fn text(message: impl Into<String>) -> TextQuestion {
        TextQuestion::new(message)
    }

    pub fn select(message: impl Into<String>) -> SelectQuestion {
        SelectQuestion::new(message)
    }

    pub fn multiselect(message: impl Into<String>) -> MultiSelectQuestion {
        MultiSelectQuestion::new(message)
    }

    pub fn confirm(message: impl Into<String>) -> ConfirmQuestion {
        ConfirmQuestion::new(message)
    }

    pub fn task(message: impl Into<String>, task: Task) -> TaskQuestion {
        TaskQuestion::new(message, task)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Text(_) => Kind::Text,
            Self::Select(_) => Kind::Select,
            Self::MultiSelect(_) => Kind::MultiSelect,
            Self::Confirm(_) => Kind::Confirm,
            Self::Task(_) => Kind::Task,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Text(q) => &q.message,
            Self::Select(q) => &q.message,
            Self::MultiSelect(q) => &q.message,
            Self::Confirm(q) => &q.message,
            Self::Task(q) => &q.message,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Self::Text(q) => q.rules.required,
            Self::Select(q) => q.rules.required,
            Self::MultiSelect(q) => q.rules.required,
            Self::Confirm(q) => q.rules.required,
            Self::Task(_) => false,
        }
    }

    pub fn is_skipped(&self, answers: &Answers) -> bool {
        match self {
            Self::Text(q) => q.rules.skip.evaluate(answers),
            Self::Select(q) => q.rules.skip.evaluate(answers),
            Self::MultiSelect(q) => q.rules.skip.evaluate(answers),
            Self::Confirm(q) => q.rules.skip.evaluate(answers),
            Self::Task(_) => false,
        }
    }

    /// The default as an [`Answer`](crate::answers::Answer), resolved against
    /// the answers given so far.
    pub fn default_answer(&self, answers: &Answers) -> Option<crate::answers::Answer> {
        match self {
            Self::Text(q) => q.rules.default_value(answers).map(Into::into),
            Self::Select(q) => q.rules.default_value(answers).map(Into::into),
            Self::MultiSelect(q) => q.rules.default_value(answers).map(Into::into),
            Self::Confirm(q) => q.rules.default_value(answers).map(Into::into),
            Self::Task(_) => None,
        }
    }

    /// Every declared choice, ignoring skip rules.
    pub fn declared_choices(&self) -> &[Choice] {
        match self {
            Self::Select(q) => q.all_choices(),
            Self::MultiSelect(q) => q.all_choices(),
            _ => &[],
        }
    }

    /// The default rendered for usage text, when it does not depend on answers.
    pub fn fixed_default_label(&self) -> Option<String> {
        match self {
            Self::Text(q) => q.rules.fixed_default().cloned(),
            Self::Select(q) => q.rules.fixed_default().cloned(),
            Self::MultiSelect(q) => q.rules.fixed_default().map(|values| values.join(", ")),
            Self::Confirm(q) => q.rules.fixed_default().map(ToString::to_string),
            Self::Task(_) => None,
        }
    }
}

impl From<TextQuestion> for Question {
    fn from(question: TextQuestion) -> Self {
        Self::Text(question)
    }
}

impl From<SelectQuestion> for Question {
    fn from(question: SelectQuestion) -> Self {
        Self::Select(question)
    }
}

impl From<MultiSelectQuestion> for Question {
    fn from(question: MultiSelectQuestion) -> Self {
        Self::MultiSelect(question)
    }
}

impl From<ConfirmQuestion> for Question {
    fn from(question: ConfirmQuestion) -> Self {
        Self::Confirm(question)
    }
}

impl From<TaskQuestion> for Question {
    fn from(question: TaskQuestion) -> Self {
        Self::Task(question)
    }
}

pub type QuestionFactory = Box<dyn Fn(&Answers) -> Option<Question>>;

/// How an [`Item`] produces its question.
pub enum Entry {
    Static(Question),
    /// Built when reached; `None` means the question does not apply.
    Dynamic(QuestionFactory),
}

/// A declared question slot: the question plus its command-line metadata.
pub struct Item {
    pub description: String,
    pub alias: Option<String>,
    pub entry: Entry,
}

impl Item {
    pub fn new(description: impl Into<String>, question: impl Into<Question>) -> Self {
        Self {
            description: description.into(),
            alias: None,
            entry: Entry::Static(question.into()),
        }
    }

    pub fn dynamic<F>(description: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Answers) -> Option<Question> + 'static,
    {
        Self {
            description: description.into(),
            alias: None,
            entry: Entry::Dynamic(Box::new(factory)),
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The question when it is known without any answers.
    pub fn static_question(&self) -> Option<&Question> {
        match &self.entry {
            Entry::Static(question) => Some(question),
            Entry::Dynamic(_) => None,
        }
    }
}
