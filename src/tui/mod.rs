//! TUI integration layer (crossterm).
//!
//! Kept apart from `kernel`/`views` so the editor core builds and tests without terminal
//! crates.

pub mod crossterm;
pub mod terminal_guard;

pub use self::crossterm::{into_input_event, poll_input};
pub use terminal_guard::{TerminalGuard, TerminalRestorer, TerminationSignal};
