use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use querent_core::answers::Answers;
use querent_core::error::{Error, Result};
use querent_core::session::{Outcome, SessionOptions};
use querent_core::{config, file_handling};

use querent_cli::cli_args::Args;
use querent_cli::interactive::colors::Theme;
use querent_cli::prompter::TerminalPrompter;

const DEFAULT_NAME: &str = "querent";

/// Load the question set and answer it
fn execute(args: &Args) -> Result<Outcome> {
    let questions_path = config::get_questions_path(&args.questions_path);
    debug!("Questions path: `{}`", questions_path);

    let question_file = file_handling::get_question_file(&questions_path)?;
    let prompt = question_file.to_prompt()?;

    let theme = match &question_file.theme {
        Some(definition) => Theme::default().with_overrides(definition)?,
        None => Theme::default(),
    };

    let name = question_file.name.as_deref().unwrap_or(DEFAULT_NAME);
    let mut options = SessionOptions::new(name).args(args.arguments.iter().cloned());
    if let Some(description) = &question_file.description {
        options = options.description(description);
    }
    if let Some(version) = &question_file.version {
        options = options.version(version);
    }
    if args.non_interactive {
        options = options.interactive(false);
    }

    let mut prompter = TerminalPrompter::new().theme(theme).mouse(!args.no_mouse);
    prompt.show(options, &mut prompter)
}

fn write_answers(args: &Args, answers: &Answers) -> Result<()> {
    match &args.output_path {
        Some(output_path) => {
            let output_path = config::get_output_path(output_path);
            file_handling::write_answers(&output_path, answers)?;
            info!("Answers written to `{output_path}`");
        }
        None => {
            let yaml = serde_yaml::to_string(answers).map_err(|e| {
                Error::yaml_error(
                    "writing".to_string(),
                    "answers".to_string(),
                    "<stdout>".to_string(),
                    e,
                )
            })?;
            print!("{yaml}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = execute(&args).and_then(|outcome| match outcome {
        Outcome::Answered(answers) => write_answers(&args, &answers),
        Outcome::Help | Outcome::Version => Ok(()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
