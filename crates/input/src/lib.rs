//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s and the
//! host-only commands (mute, quit). Key repeat comes from the terminal
//! itself; nothing here debounces or auto-repeats.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, host_command, HostCommand};
