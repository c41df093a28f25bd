//! Terminal host collaborators.
//!
//! A small, game-oriented rendering layer: the game view draws into a plain
//! framebuffer, and the renderer flushes that framebuffer to the terminal
//! with crossterm. Also home to the terminal-bell audio sink.
//!
//! - Keep `core` free of I/O
//! - Allow precise control over aspect ratio (2 columns per board cell)

pub mod audio;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_core::types;

pub use audio::BellAudio;
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
