//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state transitions. It has **no
//! dependencies** on terminals, files or audio, so it can run under the
//! terminal host, a test harness or a benchmark alike.
//!
//! # Module Structure
//!
//! - [`pieces`]: tetromino templates and clockwise matrix rotation
//! - [`grid`]: 10x20 playfield with collision detection, merging and line clearing
//! - [`bag`]: 7-bag randomizer, an explicit value threaded through spawning operations
//! - [`scoring`]: classic line-clear table and the level/speed curve
//! - [`game_state`]: the serializable `GameState` aggregate
//! - [`reducer`]: move, rotate, soft drop, hard drop, pause, restart
//! - [`gravity`]: millisecond timer that tells the driver when to soft drop
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every 7 consecutive draws from a fresh bag contain each piece once
//! - **Plain rotation**: clockwise matrix rotation, rejected on collision (no wall kicks)
//! - **Immediate lock**: a piece that cannot fall locks on the next soft drop
//! - **Spawn above the field**: pieces enter at (3, -2); locking while still partly above is game over
//! - **Scoring**: `[0, 40, 100, 300, 1200][lines] * (level + 1)`, level = lines / 10
//!
//! # Example
//!
//! ```
//! use blockfall_core::{reducer, Bag, GameState};
//! use blockfall_types::{GameAction, GameEvent};
//!
//! let mut bag = Bag::seeded(12345);
//! let state = GameState::fresh(&mut bag);
//!
//! let step = reducer::apply(&state, GameAction::MoveRight, &mut bag);
//! assert_eq!(step.events, vec![GameEvent::Move]);
//!
//! let step = reducer::apply(&step.state, GameAction::HardDrop, &mut bag);
//! assert_eq!(step.events[0], GameEvent::Drop);
//! assert!(!step.state.grid.is_empty());
//! ```

pub mod bag;
pub mod game_state;
pub mod gravity;
pub mod grid;
pub mod pieces;
pub mod reducer;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use bag::Bag;
pub use game_state::{ActivePiece, GameState, StateError};
pub use gravity::GravityTimer;
pub use grid::{Cell, Grid, Position};
pub use pieces::{tetromino, Shape, ShapeError, Tetromino};
pub use reducer::{Shift, Step};
pub use scoring::{
    drop_interval_ms, level_for_lines, line_clear_score, try_line_clear_score, ScoreError,
};
