//! Reading question files and writing answers.

use std::fs::File;

use crate::answers::Answers;
use crate::error::{Error, Result};
use crate::question_definitions::QuestionFile;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::file_error(file_description.to_string(), path.to_string(), e))
}

/// Loads a question set declaration.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file contains invalid YAML
/// - The YAML doesn't match the expected structure
pub fn get_question_file(questions_path: &str) -> Result<QuestionFile> {
    let reader = get_reader("question", questions_path)?;

    serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "question".to_string(),
            questions_path.to_string(),
            e,
        )
    })
}

/// Writes answers as YAML.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_answers(path: &str, answers: &Answers) -> Result<()> {
    let f = File::create(path)
        .map_err(|e| Error::file_error("answers".to_string(), path.to_string(), e))?;

    serde_yaml::to_writer(f, answers).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "answers".to_string(),
            path.to_string(),
            e,
        )
    })
}
