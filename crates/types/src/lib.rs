//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, so they can be used by the engine,
//! the storage layer and the terminal host alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (3, -2), i.e. new pieces enter from above the visible field
//!
//! # Timing
//!
//! Gravity is a linear function of the level (milliseconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 900ms |
//! | ... | -100ms per level |
//! | 9+ | 100ms (floor) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, TetrominoType, GRID_HEIGHT, GRID_WIDTH};
//!
//! let kind = TetrominoType::from_str("t").unwrap();
//! assert_eq!(kind, TetrominoType::T);
//! assert_eq!(kind.color().as_str(), "purple");
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: usize = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: usize = 20;

/// Spawn column of a new piece's bounding box
pub const SPAWN_X: i32 = 3;

/// Spawn row of a new piece's bounding box (above the visible field)
pub const SPAWN_Y: i32 = -2;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino types
///
/// Serialized as the upper-case letter (`"I"`, `"O"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    /// All seven types in canonical order (the content of one bag)
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    /// Parse a type from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::TetrominoType;
    ///
    /// assert_eq!(TetrominoType::from_str("i"), Some(TetrominoType::I));
    /// assert_eq!(TetrominoType::from_str("O"), Some(TetrominoType::O));
    /// assert_eq!(TetrominoType::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoType::I),
            "o" => Some(TetrominoType::O),
            "t" => Some(TetrominoType::T),
            "s" => Some(TetrominoType::S),
            "z" => Some(TetrominoType::Z),
            "j" => Some(TetrominoType::J),
            "l" => Some(TetrominoType::L),
            _ => None,
        }
    }

    /// Upper-case letter
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::O => "O",
            TetrominoType::T => "T",
            TetrominoType::S => "S",
            TetrominoType::Z => "Z",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
        }
    }

    /// Display color of this type
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Purple,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Orange,
        }
    }
}

/// Color of a filled cell
///
/// Serialized as the lower-case color name, e.g. `"cyan"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
        }
    }
}

/// Semantic input events the host can feed into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift the piece one column left
    MoveLeft,
    /// Shift the piece one column right
    MoveRight,
    /// Rotate the piece 90° clockwise (no wall kicks)
    Rotate,
    /// Step the piece one row down, locking it if it cannot move
    SoftDrop,
    /// Drop the piece to the lowest legal row and lock it
    HardDrop,
    /// Flip the pause flag
    TogglePause,
    /// Discard the current game and start a fresh one
    Restart,
}

impl GameAction {
    /// Parse an action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("togglepause"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "togglepause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
        }
    }
}

/// Notifications emitted by engine transitions
///
/// The engine never plays audio or draws banners itself; the driver forwards
/// these to its audio sink and view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Successful horizontal shift
    Move,
    /// Successful rotation
    Rotate,
    /// Hard drop started
    Drop,
    /// One full row was removed (emitted once per row)
    Clear,
    /// The level number increased
    LevelUp,
    /// A piece locked before fully entering the field
    GameOver,
}

impl GameEvent {
    /// Sound name understood by audio collaborators
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Move => "move",
            GameEvent::Rotate => "rotate",
            GameEvent::Drop => "drop",
            GameEvent::Clear => "clear",
            GameEvent::LevelUp => "levelUp",
            GameEvent::GameOver => "gameOver",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_and_timing_defaults() {
        assert_eq!(GRID_WIDTH, 10);
        assert_eq!(GRID_HEIGHT, 20);
        assert_eq!((SPAWN_X, SPAWN_Y), (3, -2));
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
    }

    #[test]
    fn test_type_roundtrip_through_str() {
        for kind in TetrominoType::ALL {
            assert_eq!(TetrominoType::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_type_colors_are_distinct() {
        let colors: std::collections::HashSet<Color> =
            TetrominoType::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colors.len(), 7);
    }

    #[test]
    fn test_action_names() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::Rotate,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::TogglePause,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&TetrominoType::L).unwrap(), "\"L\"");
        assert_eq!(serde_json::to_string(&Color::Orange).unwrap(), "\"orange\"");
        let c: Color = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(c, Color::Purple);
        assert!(serde_json::from_str::<Color>("\"magenta\"").is_err());
    }

    #[test]
    fn test_event_sound_names() {
        assert_eq!(GameEvent::LevelUp.as_str(), "levelUp");
        assert_eq!(GameEvent::GameOver.as_str(), "gameOver");
        assert_eq!(GameEvent::Clear.as_str(), "clear");
    }
}
