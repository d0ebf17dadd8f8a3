use std::io::stdout;

use crossterm::cursor::Show;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::ExecutableCommand;
use log::debug;
use querent_core::error::Result;

/// Holds the terminal in raw mode for as long as it lives.
///
/// Dropping the guard restores cooked mode, stops mouse and paste reporting
/// and shows the cursor, so every exit path out of a prompt (including a
/// panic unwinding through it) leaves the terminal usable.
pub struct RawModeGuard {
    mouse: bool,
}

impl RawModeGuard {
    /// Enters raw mode, with mouse capture when `mouse` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses raw mode.
    pub fn enable(mouse: bool) -> Result<Self> {
        enable_raw_mode()?;
        // From here on Drop undoes whatever was switched on.
        let guard = Self { mouse };

        let mut stdout = stdout();
        stdout.execute(EnableBracketedPaste)?;
        if mouse {
            stdout.execute(EnableMouseCapture)?;
        }
        debug!("Raw mode enabled (mouse: {mouse})");

        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        if self.mouse {
            let _ = stdout.execute(DisableMouseCapture);
        }
        let _ = stdout.execute(DisableBracketedPaste);
        let _ = stdout.execute(Show);
        debug!("Raw mode disabled");
    }
}
