//! Integration tests for querent-core
//!
//! These tests drive complete sessions through `Prompt::show`, both without
//! a terminal and with a scripted prompter standing in for a person.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Write;
use std::rc::Rc;

use querent_core::answers::Answer;
use querent_core::error::Error;
use querent_core::prompt::Prompt;
use querent_core::prompter::{
    ConfirmRequest, Headless, MultiSelectRequest, Prompter, SelectRequest, TaskRequest,
    TextRequest,
};
use querent_core::question::{Choice, Item, Question, Validity};
use querent_core::session::{Outcome, SessionOptions};
use querent_core::task::{Task, TaskOutcome};

enum Reply {
    Text(&'static str),
    Select(&'static str),
    Confirm(bool),
    Cancel,
}

/// Answers prompts from a script and records what was asked.
#[derive(Default)]
struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    asked: Vec<String>,
    text_defaults: Vec<Option<String>>,
}

impl ScriptedPrompter {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: replies.into(),
            ..Self::default()
        }
    }

    fn next(&mut self, message: &str) -> Reply {
        self.asked.push(message.to_string());
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, request: TextRequest<'_>) -> querent_core::error::Result<String> {
        self.text_defaults.push(request.default.clone());
        match self.next(request.message) {
            Reply::Text(text) => {
                if let Some(validate) = request.validate {
                    assert!(validate(text).is_valid(), "scripted answer must be valid");
                }
                Ok(text.to_string())
            }
            Reply::Cancel => Err(Error::Cancelled),
            _ => panic!("expected a text reply"),
        }
    }

    fn select(&mut self, request: SelectRequest<'_>) -> querent_core::error::Result<String> {
        match self.next(request.message) {
            Reply::Select(value) => {
                assert!(request.choices.iter().any(|choice| choice.value == value));
                Ok(value.to_string())
            }
            Reply::Cancel => Err(Error::Cancelled),
            _ => panic!("expected a select reply"),
        }
    }

    fn multiselect(
        &mut self,
        request: MultiSelectRequest<'_>,
    ) -> querent_core::error::Result<Vec<String>> {
        match self.next(request.message) {
            Reply::Cancel => Err(Error::Cancelled),
            _ => Ok(request.default),
        }
    }

    fn confirm(&mut self, request: ConfirmRequest<'_>) -> querent_core::error::Result<bool> {
        match self.next(request.message) {
            Reply::Confirm(value) => Ok(value),
            Reply::Cancel => Err(Error::Cancelled),
            _ => panic!("expected a confirm reply"),
        }
    }

    fn task(&mut self, request: TaskRequest<'_>) -> querent_core::error::Result<Answer> {
        self.asked.push(request.message.to_string());
        Ok(request.task.run_detached(request.answers)?.value)
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn username_length(value: &str) -> Validity {
    if value.len() >= 3 {
        Validity::Valid
    } else {
        Validity::from("Username must be at least 3 characters")
    }
}

fn order_prompt() -> Prompt {
    Prompt::builder()
        .positional("<name>")
        .question(
            "name",
            Item::new("Your name", Question::text("What is your name?").required(true)),
        )
        .question(
            "drink",
            Item::new(
                "Favourite drink",
                Question::select("What would you like to drink?")
                    .choice(Choice::new("coffee").title("Coffee"))
                    .choice(Choice::new("tea").title("Tea"))
                    .required(true),
            )
            .alias("d"),
        )
        .build()
        .unwrap()
}

fn run(prompt: &Prompt, args: &[&str]) -> Result<Outcome, Error> {
    let options = SessionOptions::new("test")
        .args(args.iter().copied())
        .interactive(false);
    prompt.show(options, &mut Headless)
}

fn answers(prompt: &Prompt, args: &[&str]) -> querent_core::answers::Answers {
    run(prompt, args).unwrap().answers().unwrap()
}

#[test]
fn test_coffee_or_tea() {
    let prompt = order_prompt();

    let answers = answers(&prompt, &["Alice", "--drink", "coffee"]);
    assert_eq!(answers.text("name"), Some("Alice"));
    assert_eq!(answers.text("drink"), Some("coffee"));
    assert_eq!(answers.keys().collect::<Vec<_>>(), vec!["name", "drink"]);

    let error = run(&prompt, &["Alice", "--drink", "soda"]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid value for option '--drink'. Expected one of 'coffee', 'tea', got 'soda'"
    );
}

#[test]
fn test_satisfied_arguments_never_prompt() {
    let prompt = order_prompt();
    let mut prompter = ScriptedPrompter::new(vec![]);

    let options = SessionOptions::new("test")
        .args(["Alice", "-d", "tea"])
        .interactive(true);
    let answers = prompt.show(options, &mut prompter).unwrap().answers().unwrap();

    assert_eq!(answers.text("drink"), Some("tea"));
    assert!(prompter.asked.is_empty());
}

#[test]
fn test_required_after_optional_positional() {
    let result = Prompt::builder()
        .positional("<first>")
        .positional("[optional]")
        .positional("<required>")
        .build();
    let Err(error) = result else {
        panic!("expected a configuration error");
    };
    assert_eq!(
        error.to_string(),
        "Required argument '<required>' cannot appear after optional arguments"
    );
}

#[test]
fn test_validation_messages() {
    let prompt = Prompt::builder()
        .question(
            "username",
            Item::new(
                "Username",
                Question::text("Username?").validate(username_length),
            ),
        )
        .question(
            "nickname",
            Item::new(
                "Nickname",
                Question::text("Nickname?").validate(|value: &str| value.len() >= 3),
            ),
        )
        .build()
        .unwrap();

    let error = run(&prompt, &["--username", "ab"]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid value for option '--username'. Username must be at least 3 characters"
    );

    let error = run(&prompt, &["--username", "abc", "--nickname", "ab"]).unwrap_err();
    assert_eq!(error.to_string(), "Invalid value for option '--nickname'");
}

#[test]
fn test_missing_value_and_unknown_option() {
    let prompt = Prompt::builder()
        .question("username", Item::new("Username", Question::text("Username?")))
        .build()
        .unwrap();

    let error = run(&prompt, &["--username"]).unwrap_err();
    assert_eq!(error.to_string(), "Option '--username <value>' argument missing");

    let error = run(&prompt, &["--username", "alice", "-x"]).unwrap_err();
    assert_eq!(error.to_string(), "Unknown option '-x'");

    let error = run(&prompt, &["--extra", "1"]).unwrap_err();
    assert!(error.to_string().contains("Unknown option '--extra'"));
}

#[test]
fn test_required_wins_over_default_without_terminal() {
    let prompt = Prompt::builder()
        .question(
            "username",
            Item::new(
                "Username",
                Question::text("Username?").default("guest").required(true),
            ),
        )
        .build()
        .unwrap();

    let error = run(&prompt, &[]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Missing required option '--username'. Provide a value using --username"
    );

    let error = run(&prompt, &["--username="]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid value for option '--username'. Got empty string"
    );
}

#[test]
fn test_optional_question_takes_default_without_terminal() {
    let prompt = Prompt::builder()
        .question(
            "username",
            Item::new("Username", Question::text("Username?").default("guest")),
        )
        .question("nickname", Item::new("Nickname", Question::text("Nickname?")))
        .build()
        .unwrap();

    let answers = answers(&prompt, &[]);
    assert_eq!(answers.text("username"), Some("guest"));
    assert!(!answers.contains("nickname"));
}

#[test]
fn test_empty_values() {
    let prompt = Prompt::builder()
        .question("comment", Item::new("Comment", Question::text("Comment?")))
        .question(
            "fruits",
            Item::new(
                "Fruits",
                Question::multiselect("Fruits?")
                    .choice(Choice::new("apple"))
                    .choice(Choice::new("banana")),
            ),
        )
        .build()
        .unwrap();

    let answers = answers(&prompt, &["--comment=", "--fruits="]);
    assert_eq!(answers.get("comment"), Some(&Answer::Text(String::new())));
    assert_eq!(answers.get("fruits"), Some(&Answer::List(vec![])));
}

#[test]
fn test_multiselect_flags_accumulate_and_skipped_choices_are_rejected() {
    let prompt = Prompt::builder()
        .question(
            "fruits",
            Item::new(
                "Fruits",
                Question::multiselect("Fruits?")
                    .choice(Choice::new("apple"))
                    .choice(Choice::new("banana"))
                    .choice(Choice::new("grape").skip(true)),
            ),
        )
        .build()
        .unwrap();

    let answers = answers(&prompt, &["--fruits", "banana", "--fruits", "apple"]);
    assert_eq!(answers.list("fruits").unwrap(), ["banana", "apple"]);

    let error = run(&prompt, &["--fruits", "apple", "--fruits", "grape"]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid value for option '--fruits'. Expected one of 'apple', 'banana', got 'apple, grape'"
    );
}

#[test]
fn test_kebab_and_camel_keys() {
    for key in ["user-name", "userName"] {
        let prompt = Prompt::builder()
            .question(key, Item::new("User name", Question::text("Name?")))
            .build()
            .unwrap();

        let answers = answers(&prompt, &["--user-name", "alice"]);
        assert_eq!(answers.text(key), Some("alice"), "key {key}");
    }
}

#[test]
fn test_confirm_flags() {
    let prompt = Prompt::builder()
        .question("adult", Item::new("Adult", Question::confirm("Adult?")))
        .build()
        .unwrap();

    assert_eq!(answers(&prompt, &["--adult"]).flag("adult"), Some(true));
    assert_eq!(answers(&prompt, &["--no-adult"]).flag("adult"), Some(false));
    assert_eq!(answers(&prompt, &["--adult=no"]).flag("adult"), Some(false));
}

#[test]
fn test_positionals_without_questions() {
    let prompt = Prompt::builder()
        .positional("<name>")
        .positional("[directory]")
        .build()
        .unwrap();

    let answers = answers(&prompt, &["my-app"]);
    assert_eq!(answers.text("name"), Some("my-app"));
    assert!(!answers.contains("directory"));

    let error = run(&prompt, &[]).unwrap_err();
    assert_eq!(error.to_string(), "Missing required argument '<name>'");

    let error = run(&prompt, &["a", "b", "c"]).unwrap_err();
    assert_eq!(error.to_string(), "Unexpected argument 'c'");
}

#[test]
fn test_tasks_run_without_terminal() {
    let prompt = Prompt::builder()
        .positional("<name>")
        .question(
            "greeting",
            Item::new(
                "Greeting",
                Question::task(
                    "Greeting",
                    Task::new(|context| {
                        let name = context.answers.text("name").unwrap_or("nobody");
                        Ok(TaskOutcome::new(format!("Hello {name}")))
                    }),
                ),
            ),
        )
        .build()
        .unwrap();

    let answers = answers(&prompt, &["Alice"]);
    assert_eq!(answers.text("greeting"), Some("Hello Alice"));
}

#[test]
fn test_skipped_question_uses_default() {
    let prompt = Prompt::builder()
        .question(
            "sugar",
            Item::new(
                "Sugar",
                Question::confirm("Sugar?").default(true).skip(true).required(true),
            ),
        )
        .question(
            "milk",
            Item::new("Milk", Question::confirm("Milk?").skip(true)),
        )
        .build()
        .unwrap();

    let answers = answers(&prompt, &[]);
    assert_eq!(answers.flag("sugar"), Some(true));
    assert!(!answers.contains("milk"));
}

#[test]
fn test_dynamic_questions_read_earlier_answers() {
    let prompt = Prompt::builder()
        .question(
            "drink",
            Item::new(
                "Drink",
                Question::select("Drink?")
                    .choice(Choice::new("coffee"))
                    .choice(Choice::new("tea")),
            ),
        )
        .question(
            "milk",
            Item::dynamic("Milk", |answers| {
                (answers.text("drink") == Some("coffee"))
                    .then(|| Question::confirm("Milk?").default(false).into())
            }),
        )
        .question(
            "strength",
            Item::new(
                "Strength",
                Question::text("Strength?")
                    .default_with(|answers| answers.text("drink").map(|d| format!("strong {d}"))),
            ),
        )
        .build()
        .unwrap();

    let coffee = answers(&prompt, &["--drink", "coffee"]);
    assert_eq!(coffee.flag("milk"), Some(false));
    assert_eq!(coffee.text("strength"), Some("strong coffee"));

    let tea = answers(&prompt, &["--drink", "tea"]);
    assert!(!tea.contains("milk"));
}

#[test]
fn test_dynamic_multiselect_accumulates_flags() {
    let prompt = Prompt::builder()
        .question(
            "fruits",
            Item::dynamic("Fruits", |_| {
                Some(
                    Question::multiselect("Fruits?")
                        .choice(Choice::new("apple"))
                        .choice(Choice::new("banana"))
                        .into(),
                )
            }),
        )
        .question(
            "comment",
            Item::dynamic("Comment", |_| Some(Question::text("Comment?").into())),
        )
        .build()
        .unwrap();

    let repeated = answers(&prompt, &["--fruits", "apple", "--fruits", "banana"]);
    assert_eq!(repeated.list("fruits").unwrap(), ["apple", "banana"]);

    let empty = answers(&prompt, &["--fruits="]);
    assert_eq!(empty.get("fruits"), Some(&Answer::List(vec![])));

    let error = run(&prompt, &["--comment", "a", "--comment", "b"]).unwrap_err();
    assert_eq!(error.to_string(), "Duplicate argument '--comment'");
}

#[test]
fn test_interactive_session_prompts_for_missing_and_invalid_values() {
    let prompt = Prompt::builder()
        .question(
            "username",
            Item::new(
                "Username",
                Question::text("Username?").validate(username_length),
            ),
        )
        .question(
            "drink",
            Item::new(
                "Drink",
                Question::select("Drink?")
                    .choice(Choice::new("coffee"))
                    .choice(Choice::new("tea")),
            ),
        )
        .question("adult", Item::new("Adult", Question::confirm("Adult?")))
        .build()
        .unwrap();

    let mut prompter = ScriptedPrompter::new(vec![
        Reply::Text("alice"),
        Reply::Select("tea"),
        Reply::Confirm(true),
    ]);
    let options = SessionOptions::new("test")
        .args(["--username", "ab", "--drink"])
        .interactive(true);
    let answers = prompt.show(options, &mut prompter).unwrap().answers().unwrap();

    assert_eq!(prompter.asked, vec!["Username?", "Drink?", "Adult?"]);
    assert_eq!(answers.text("username"), Some("alice"));
    assert_eq!(answers.text("drink"), Some("tea"));
    assert_eq!(answers.flag("adult"), Some(true));
}

#[test]
fn test_interactive_text_receives_computed_default() {
    let prompt = Prompt::builder()
        .positional("<name>")
        .question(
            "directory",
            Item::new(
                "Directory",
                Question::text("Directory?")
                    .default_with(|answers| answers.text("name").map(|name| format!("./{name}"))),
            ),
        )
        .build()
        .unwrap();

    let mut prompter = ScriptedPrompter::new(vec![Reply::Text("./elsewhere")]);
    let options = SessionOptions::new("test").args(["my-app"]).interactive(true);
    prompt.show(options, &mut prompter).unwrap();

    assert_eq!(prompter.text_defaults, vec![Some("./my-app".to_string())]);
}

#[test]
fn test_cancel_calls_on_cancel_once() {
    let prompt = order_prompt();
    let cancelled = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&cancelled);

    let mut prompter = ScriptedPrompter::new(vec![Reply::Cancel]);
    let options = SessionOptions::new("test")
        .args(["Alice"])
        .interactive(true)
        .on_cancel(move || *counter.borrow_mut() += 1);

    let result = prompt.show(options, &mut prompter);
    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(*cancelled.borrow(), 1);
    assert_eq!(prompter.asked, vec!["What would you like to drink?"]);
}

#[test]
fn test_help_and_version() {
    let prompt = order_prompt();

    let output = SharedBuffer::default();
    let options = SessionOptions::new("order")
        .description("Order a drink")
        .args(["--help"])
        .interactive(false)
        .output(output.clone());
    let outcome = prompt.show(options, &mut Headless).unwrap();
    assert_eq!(outcome, Outcome::Help);
    let text = output.contents();
    assert!(text.starts_with("Usage: order <name>\n\nOrder a drink\n"));
    assert!(text.contains("-d, --drink"));

    let output = SharedBuffer::default();
    let options = SessionOptions::new("order")
        .version("1.2.3")
        .args(["-v"])
        .interactive(false)
        .output(output.clone());
    let outcome = prompt.show(options, &mut Headless).unwrap();
    assert_eq!(outcome, Outcome::Version);
    assert_eq!(output.contents(), "1.2.3\n");
}
