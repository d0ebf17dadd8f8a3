//! Raw terminal plumbing: painting frames, decoding input, raw mode.

pub mod input;
pub mod raw_mode;
pub mod renderer;

pub use input::{InputEvent, InputReader};
pub use raw_mode::RawModeGuard;
pub use renderer::Renderer;
