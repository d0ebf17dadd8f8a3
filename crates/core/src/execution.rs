use std::collections::HashMap;
use std::process::{Command, Stdio};

use log::info;

use crate::config;
use crate::error::{Error, Result};

/// Runs a command to completion and returns its trimmed standard output.
///
/// Standard input is closed and both output streams are captured, so the
/// command cannot draw over an active prompt.
///
/// # Errors
///
/// Returns an error if the command is empty, cannot be started, or exits
/// with a non-zero status. The error carries the command's stderr.
pub fn capture_command<S: ::std::hash::BuildHasher>(
    arguments: &[String],
    working_directory: Option<&str>,
    environment: Option<&HashMap<String, String, S>>,
) -> Result<String> {
    let (program, rest) = arguments
        .split_first()
        .ok_or_else(|| Error::Task("no command to run".to_string()))?;

    let mut command = Command::new(program);
    command
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(working_directory) = config::expand_working_directory(working_directory) {
        command.current_dir(working_directory);
    }

    if let Some(environment) = environment {
        info!("Executing with environment variables: {:?}", environment);
        command.envs(environment);
    };

    let output = command.output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(Error::Task(format!(
            "`{program}` exited with {}: {}",
            output.status,
            stderr.trim()
        )))
    }
}
