//! Game state module - the aggregate value every engine operation replaces
//!
//! `GameState` is plain data. Operations in [`crate::reducer`] take a state
//! by reference and hand back a new one; nothing here mutates in place.
//!
//! The JSON form uses camelCase keys (`currentPiece`, `linesCleared`, ...)
//! so a saved session reads the same as the browser build's records.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bag::Bag;
use crate::grid::{Grid, Position};
use crate::pieces::{tetromino, Tetromino, MAX_SHAPE_SIZE};
use crate::types::{GRID_HEIGHT, GRID_WIDTH, SPAWN_X, SPAWN_Y};

/// The falling piece
///
/// `position` is the top-left of the shape's bounding box and may have a
/// negative `y` while the piece enters the field. `rotation` counts quarter
/// turns mod 4 and is informational only; the orientation lives in
/// `tetromino.shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    pub tetromino: Tetromino,
    pub position: Position,
    pub rotation: u8,
}

impl ActivePiece {
    /// Place a template at the spawn point, unrotated
    pub fn spawn(tetromino: Tetromino) -> Self {
        Self {
            tetromino,
            position: Position::new(SPAWN_X, SPAWN_Y),
            rotation: 0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub grid: Grid,
    pub current_piece: Option<ActivePiece>,
    pub next_piece: Option<Tetromino>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub is_game_over: bool,
    pub is_paused: bool,
}

/// Ways a deserialized state can break the engine's invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("cell ({x}, {y}) has filled={filled} but color is {color}")]
    InconsistentCell {
        x: usize,
        y: usize,
        filled: bool,
        color: &'static str,
    },
    #[error("row {0} is full but was never cleared")]
    FullRow(usize),
    #[error("game is running but has no current piece")]
    MissingCurrentPiece,
    #[error("game is running but has no next piece")]
    MissingNextPiece,
    #[error("current piece at ({x}, {y}) is nowhere near the field")]
    PieceOutOfRange { x: i32, y: i32 },
    #[error("current piece overlaps the stack or a wall")]
    PieceOverlap,
}

impl GameState {
    /// Fresh game: empty grid, zero counters, two pieces drawn from `bag`
    /// (current first, then next).
    pub fn fresh<R: Rng>(bag: &mut Bag<R>) -> Self {
        let current = tetromino(bag.draw());
        let next = tetromino(bag.draw());
        Self {
            grid: Grid::new(),
            current_piece: Some(ActivePiece::spawn(current)),
            next_piece: Some(next),
            score: 0,
            level: 0,
            lines_cleared: 0,
            is_game_over: false,
            is_paused: false,
        }
    }

    /// Whether the engine will accept piece operations on this state
    pub fn is_playable(&self) -> bool {
        self.current_piece.is_some() && !self.is_game_over && !self.is_paused
    }

    /// Check the invariants a running game always upholds.
    ///
    /// Used to reject tampered or stale persisted records before resuming.
    pub fn validate(&self) -> Result<(), StateError> {
        for (y, row) in self.grid.rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.filled != cell.color.is_some() {
                    return Err(StateError::InconsistentCell {
                        x,
                        y,
                        filled: cell.filled,
                        color: cell.color.map_or("none", |c| c.as_str()),
                    });
                }
            }
        }

        if let Some(y) = (0..GRID_HEIGHT).find(|&y| self.grid.is_row_full(y)) {
            return Err(StateError::FullRow(y));
        }

        if self.is_game_over {
            return Ok(());
        }

        let piece = self
            .current_piece
            .as_ref()
            .ok_or(StateError::MissingCurrentPiece)?;
        if self.next_piece.is_none() {
            return Err(StateError::MissingNextPiece);
        }
        // Keeps the coordinate arithmetic in `collides` far from overflow
        let Position { x, y } = piece.position;
        let reach = MAX_SHAPE_SIZE as i32;
        if !(-reach..GRID_WIDTH as i32).contains(&x) || !(-reach..GRID_HEIGHT as i32).contains(&y) {
            return Err(StateError::PieceOutOfRange { x, y });
        }
        if self.grid.collides(&piece.tetromino.shape, piece.position) {
            return Err(StateError::PieceOverlap);
        }

        Ok(())
    }

    /// Absolute grid coordinates covered by the current piece
    /// (including rows above the field).
    pub fn piece_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.current_piece.iter().flat_map(|piece| {
            piece
                .tetromino
                .shape
                .filled_cells()
                .map(move |(dx, dy)| (piece.position.x + dx, piece.position.y + dy))
        })
    }

    /// Whether (x, y) lies inside the visible field
    pub fn in_field(x: i32, y: i32) -> bool {
        (0..GRID_WIDTH as i32).contains(&x) && (0..GRID_HEIGHT as i32).contains(&y)
    }
}
