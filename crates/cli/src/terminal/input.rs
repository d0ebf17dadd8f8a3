use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A key press or terminal event, as the prompts understand it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    CtrlC,
    Char(char),
    Backspace,
    Delete,
    Home,
    End,
    Paste(String),
    /// Left button pressed on a screen row.
    Click { row: u16 },
    Resize { columns: u16 },
}

impl InputEvent {
    /// Maps a crossterm event; `None` for events no prompt reacts to.
    ///
    /// Scrolling moves like the arrow keys. Key releases and repeats reported
    /// by enhanced keyboards are ignored.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::from_key(key),
            Event::Key(_) => None,
            Event::Mouse(MouseEvent { kind, row, .. }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Self::Click { row }),
                MouseEventKind::ScrollUp => Some(Self::Up),
                MouseEventKind::ScrollDown => Some(Self::Down),
                _ => None,
            },
            Event::Paste(text) => Some(Self::Paste(text)),
            Event::Resize(columns, _) => Some(Self::Resize { columns }),
            Event::FocusGained | Event::FocusLost => None,
        }
    }

    fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'C') => Some(Self::CtrlC),
                _ => None,
            };
        }

        Some(match key.code {
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::Char(' ') => Self::Space,
            KeyCode::Char(c) => Self::Char(c),
            _ => return None,
        })
    }
}

/// Reads terminal events on a background thread and forwards them over a
/// channel.
///
/// The thread stops when the reader is dropped, when the receiving side goes
/// away, or when the terminal can no longer be read. In the last two cases
/// the sender is dropped, which the receiving prompt sees as closed input.
pub struct InputReader {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    pub fn spawn(sender: Sender<InputEvent>) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&shutdown);

        let handle = thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        warn!("Polling terminal events failed: {e}");
                        break;
                    }
                }

                let event = match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Reading a terminal event failed: {e}");
                        break;
                    }
                };

                if let Some(input) = InputEvent::from_crossterm(event) {
                    if sender.send(input).is_err() {
                        break;
                    }
                }
            }
            debug!("Input reader stopped");
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
