use std::io::Write;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, never, select, tick, unbounded, Receiver};
use log::{debug, warn};
use querent_core::answers::Answer;
use querent_core::error::{Error, Result};
use querent_core::prompter::TaskRequest;
use querent_core::task::{Progress, TaskContext, TaskOutcome};

use super::colors::Status;
use super::components;
use super::Screen;
use crate::terminal::{InputEvent, Renderer};

pub const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Runs a task on a worker thread behind an animated spinner.
///
/// Progress reports replace the spinner's message. When the task finishes
/// the frame shows the outcome's message (or the question's) and the answer.
///
/// Ctrl-C stops the spinner and returns [`Error::Cancelled`], but the worker
/// keeps running until the task returns on its own.
///
/// # Errors
///
/// Returns the task's own error unchanged, [`Error::Cancelled`] on Ctrl-C,
/// or an IO error if the terminal cannot be written.
pub fn task<W: Write>(request: TaskRequest<'_>, mut screen: Screen<'_, W>) -> Result<Answer> {
    let (progress_sender, mut progress) = unbounded::<String>();
    let (done_sender, done) = bounded::<Result<TaskOutcome>>(1);

    let body = request.task.clone();
    let context = TaskContext {
        answers: request.answers,
        progress: Progress::channel(progress_sender),
    };
    thread::spawn(move || {
        // Nobody is listening any more if the spinner was cancelled.
        let _ = done_sender.send(body.run(context));
    });

    let theme = screen.theme;
    let mut renderer = Renderer::new(&mut screen.out, screen.columns);
    let mut events: Receiver<InputEvent> = screen.events.clone();
    let ticker = tick(TICK_INTERVAL);

    let mut message = request.message.to_string();
    let mut counter = 0usize;
    renderer.render(&components::spinner(
        &theme,
        counter,
        &message,
        Status::Pending,
        None,
    ))?;

    loop {
        select! {
            recv(ticker) -> _ => counter = counter.wrapping_add(1),
            recv(progress) -> update => match update {
                Ok(update) => message = update,
                Err(_) => progress = never(),
            },
            recv(done) -> result => {
                let outcome = result.unwrap_or_else(|_| {
                    Err(Error::Task("the task stopped without reporting a result".to_string()))
                });
                return match outcome {
                    Ok(outcome) => {
                        let message = outcome.message.as_deref().unwrap_or(request.message);
                        let answer = outcome.value.to_string();
                        renderer.update(&components::spinner(
                            &theme,
                            counter,
                            message,
                            Status::Done,
                            Some(&answer),
                        ))?;
                        renderer.finish()?;
                        Ok(outcome.value)
                    }
                    Err(e) => {
                        warn!("Task `{}` failed", request.message);
                        let reason = e.to_string();
                        renderer.update(&components::spinner(
                            &theme,
                            counter,
                            &message,
                            Status::Failed,
                            Some(&reason),
                        ))?;
                        renderer.finish()?;
                        Err(e)
                    }
                };
            },
            recv(events) -> event => match event {
                Ok(InputEvent::CtrlC) => {
                    renderer.update(&components::spinner(
                        &theme,
                        counter,
                        &message,
                        Status::Cancelled,
                        None,
                    ))?;
                    renderer.finish()?;
                    debug!("Spinner cancelled; the task keeps running in the background");
                    return Err(Error::Cancelled);
                }
                Ok(InputEvent::Resize { columns }) => renderer.resize(columns),
                Ok(_) => {}
                Err(_) => events = never(),
            },
        }

        renderer.update(&components::spinner(
            &theme,
            counter,
            &message,
            Status::Pending,
            None,
        ))?;
    }
}
