//! Long-running work attached to a task question.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::info;

use crate::answers::{Answer, Answers};
use crate::error::Result;

/// What a finished task reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub value: Answer,
    /// Replaces the question's message in the finished frame.
    pub message: Option<String>,
}

impl TaskOutcome {
    pub fn new(value: impl Into<Answer>) -> Self {
        Self {
            value: value.into(),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Progress reporting handle given to a running task.
///
/// When a spinner is attached, reports replace its message. Without one the
/// reports are logged.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    sender: Option<Sender<String>>,
}

impl Progress {
    pub fn channel(sender: Sender<String>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn detached() -> Self {
        Self { sender: None }
    }

    pub fn report(&self, message: impl Into<String>) {
        let message = message.into();
        match &self.sender {
            // The spinner may already be gone after a cancel.
            Some(sender) => {
                let _ = sender.send(message);
            }
            None => info!("{message}"),
        }
    }
}

/// Everything a task receives when it starts.
pub struct TaskContext {
    /// Snapshot of the answers given before the task was reached.
    pub answers: Answers,
    pub progress: Progress,
}

type TaskFn = dyn Fn(TaskContext) -> Result<TaskOutcome> + Send + Sync;

/// A shareable task body. Runs on a worker thread while a spinner is shown.
#[derive(Clone)]
pub struct Task(Arc<TaskFn>);

impl Task {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(TaskContext) -> Result<TaskOutcome> + Send + Sync + 'static,
    {
        Self(Arc::new(run))
    }

    pub fn run(&self, context: TaskContext) -> Result<TaskOutcome> {
        (self.0)(context)
    }

    /// Runs on the calling thread with progress sent to the log.
    pub fn run_detached(&self, answers: Answers) -> Result<TaskOutcome> {
        self.run(TaskContext {
            answers,
            progress: Progress::detached(),
        })
    }
}

impl Debug for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Task(..)")
    }
}
