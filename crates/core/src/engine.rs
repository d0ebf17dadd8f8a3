//! Per-question answer resolution.
//!
//! Questions are resolved one at a time, in declaration order. For each one
//! the engine tries, in turn: a command-line value, the skip rule, the
//! non-interactive fallback, and finally the [`Prompter`].

use std::io::Write;

use log::{debug, info, warn};

use crate::answers::{Answer, Answers};
use crate::arguments::{self, option_name, ArgValue, ParsedArguments, Request};
use crate::error::Error::{MissingRequired, NoChoices};
use crate::error::{Error, ErrorKind, Result};
use crate::prompt::Prompt;
use crate::prompter::{
    ConfirmRequest, MultiSelectRequest, Prompter, SelectRequest, TaskRequest, TextRequest,
};
use crate::question::{Entry, Kind, Question, TaskQuestion};
use crate::session::{Outcome, SessionOptions};
use crate::usage;

struct Session<'p> {
    interactive: bool,
    parsed: ParsedArguments,
    answers: Answers,
    prompter: &'p mut dyn Prompter,
}

impl Prompt {
    /// Resolves every question and returns the collected answers.
    ///
    /// `-h/--help` and `-v/--version` write to the session output and end the
    /// session early.
    ///
    /// # Errors
    ///
    /// In a non-interactive session any unusable or missing value is an
    /// error. In an interactive one, values that belong to a question are
    /// discarded with a warning and the question is prompted instead.
    /// Cancelling a prompt calls `on_cancel` once and returns
    /// [`Error::Cancelled`].
    pub fn show(
        &self,
        mut options: SessionOptions,
        prompter: &mut dyn Prompter,
    ) -> Result<Outcome> {
        let interactive = options.is_interactive();
        let args = options.arguments();
        debug!("Showing `{}` (interactive: {interactive}) with {args:?}", options.name);

        let parsed = arguments::resolve(&self.positionals, &self.options, &args)?;

        match parsed.request() {
            Some(Request::Help) => {
                let text = usage::render(self, &options.name, options.description.as_deref());
                writeln!(options.output, "{text}")?;
                options.output.flush()?;
                return Ok(Outcome::Help);
            }
            Some(Request::Version) => {
                let version = options.version.as_deref().unwrap_or("unknown");
                writeln!(options.output, "{version}")?;
                options.output.flush()?;
                return Ok(Outcome::Version);
            }
            None => {}
        }

        let mut session = Session {
            interactive,
            parsed,
            answers: Answers::default(),
            prompter,
        };

        match self.resolve_all(&mut session) {
            Ok(()) => Ok(Outcome::Answered(session.answers)),
            Err(Error::Cancelled) => {
                info!("Prompt cancelled");
                if let Some(on_cancel) = options.on_cancel.as_mut() {
                    on_cancel();
                }
                Err(Error::Cancelled)
            }
            Err(e) => Err(e),
        }
    }

    fn resolve_all(&self, session: &mut Session<'_>) -> Result<()> {
        // Positionals without a question of their own are plain text answers.
        for positional in &self.positionals {
            if self.items.contains_key(&positional.name) {
                continue;
            }
            if let Some(error) = session.parsed.take_rejected(&positional.name) {
                return Err(error);
            }
            if let Some(ArgValue::Text(value)) =
                session.parsed.take(&positional.name, false).transpose()?
            {
                session.answers.record(&positional.name, Answer::Text(value));
            }
        }

        for (key, item) in &self.items {
            let built;
            let question = match &item.entry {
                Entry::Static(question) => question,
                Entry::Dynamic(factory) => match factory(&session.answers) {
                    Some(question) => {
                        built = question;
                        &built
                    }
                    None => {
                        debug!("Question `{key}` does not apply");
                        if session.parsed.discard(key) {
                            warn!("Ignoring the value given for `{}`", option_name(key));
                        }
                        continue;
                    }
                },
            };

            if let Some(answer) = resolve_question(key, question, session)? {
                session.answers.record(key, answer);
            }
        }

        Ok(())
    }
}

fn recoverable(error: &Error) -> bool {
    matches!(error.kind(), ErrorKind::Parse | ErrorKind::Validation)
}

fn resolve_question(
    key: &str,
    question: &Question,
    session: &mut Session<'_>,
) -> Result<Option<Answer>> {
    if let Question::Task(task) = question {
        return run_task(task, session).map(Some);
    }

    let option = option_name(key);
    let mut discarded = false;

    // Repeats only accumulate once the question is known to be a multiselect,
    // which for dynamic items is only now.
    let multiple = question.kind() == Kind::MultiSelect;
    let supplied = if let Some(error) = session.parsed.take_rejected(key) {
        Err(error)
    } else {
        match session.parsed.take(key, multiple) {
            Some(Ok(value)) => {
                arguments::validation::accept(question, &option, value, &session.answers)
                    .map(Some)
            }
            Some(Err(error)) => Err(error),
            None => Ok(None),
        }
    };

    match supplied {
        Ok(Some(answer)) => {
            debug!("`{key}` answered from the command line");
            return Ok(Some(answer));
        }
        Ok(None) => {}
        Err(error) if session.interactive && recoverable(&error) => {
            warn!("{error}");
            discarded = true;
        }
        Err(error) => return Err(error),
    }

    if !discarded && question.is_skipped(&session.answers) {
        debug!("Skipping `{key}`");
        return Ok(question.default_answer(&session.answers));
    }

    if !session.interactive {
        if question.is_required() {
            return Err(MissingRequired(option));
        }
        return Ok(question.default_answer(&session.answers));
    }

    ask(key, question, session).map(Some)
}

fn run_task(task: &TaskQuestion, session: &mut Session<'_>) -> Result<Answer> {
    if session.interactive {
        session.prompter.task(TaskRequest {
            message: &task.message,
            task: &task.task,
            answers: session.answers.clone(),
        })
    } else {
        info!("{}", task.message);
        let outcome = task.task.run_detached(session.answers.clone())?;
        Ok(outcome.value)
    }
}

fn ask(key: &str, question: &Question, session: &mut Session<'_>) -> Result<Answer> {
    let answers = &session.answers;

    match question {
        Question::Text(text) => session
            .prompter
            .text(TextRequest {
                message: &text.message,
                default: text.rules().default_value(answers),
                validate: text.rules().validator(),
            })
            .map(Answer::Text),
        Question::Select(select) => {
            let choices = select.visible_choices(answers);
            if choices.is_empty() {
                return Err(NoChoices(key.to_string()));
            }
            session
                .prompter
                .select(SelectRequest {
                    message: &select.message,
                    choices,
                    default: select.rules().default_value(answers),
                    validate: select.rules().validator(),
                })
                .map(Answer::Text)
        }
        Question::MultiSelect(multi) => {
            let choices = multi.visible_choices(answers);
            if choices.is_empty() {
                return Ok(Answer::List(Vec::new()));
            }
            session
                .prompter
                .multiselect(MultiSelectRequest {
                    message: &multi.message,
                    choices,
                    default: multi.rules().default_value(answers).unwrap_or_default(),
                    validate: multi.rules().validator(),
                })
                .map(Answer::List)
        }
        Question::Confirm(confirm) => session
            .prompter
            .confirm(ConfirmRequest {
                message: &confirm.message,
                default: confirm.rules().default_value(answers),
                validate: confirm.rules().validator(),
            })
            .map(Answer::Flag),
        Question::Task(task) => run_task(task, session),
    }
}
