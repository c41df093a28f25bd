//! Grid module - the 10x20 playfield
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (top to bottom). A piece's position may have negative y while it enters
//! from above; those rows are never stored.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::pieces::Shape;
use crate::types::{Color, GRID_HEIGHT, GRID_WIDTH};

/// One grid square
///
/// Empty cells carry no color. Serialized as `{"filled":true,"color":"cyan"}`
/// or `{"filled":false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub filled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        filled: false,
        color: None,
    };

    pub fn filled(color: Color) -> Self {
        Self {
            filled: true,
            color: Some(color),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Top-left corner of a piece's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same position shifted by (dx, dy)
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

type Row = [Cell; GRID_WIDTH];

/// The playfield - 20 rows of 10 cells, row-major
///
/// Serialized as a nested array `grid[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: [Row; GRID_HEIGHT],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            rows: [[Cell::EMPTY; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || x >= GRID_WIDTH as i32 || y < 0 || y >= GRID_HEIGHT as i32 {
            return None;
        }
        Some((y as usize, x as usize))
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Get the cell at (x, y), or `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|(row, col)| self.rows[row][col])
    }

    /// Set the cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((row, col)) => {
                self.rows[row][col] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Cell { filled: true, .. }))
    }

    pub fn rows(&self) -> &[Row; GRID_HEIGHT] {
        &self.rows
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.filled))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|cell| !cell.filled)
    }

    /// Whether `shape` placed at `position` hits a wall, the floor or a
    /// filled cell.
    ///
    /// Cells above the field (y < 0) only collide with the side walls.
    /// Bounds are tested before any grid access, in this order: x range,
    /// spawn allowance, floor, occupancy.
    pub fn collides(&self, shape: &Shape, position: Position) -> bool {
        shape.filled_cells().any(|(dx, dy)| {
            let x = position.x + dx;
            let y = position.y + dy;

            if x < 0 || x >= GRID_WIDTH as i32 {
                return true;
            }
            if y < 0 {
                return false;
            }
            if y >= GRID_HEIGHT as i32 {
                return true;
            }
            self.rows[y as usize][x as usize].filled
        })
    }

    /// Return a copy of this grid with `shape` stamped at `position`.
    ///
    /// Cells that land above the field are dropped. `self` is untouched.
    pub fn merge(&self, shape: &Shape, position: Position, color: Color) -> Grid {
        let mut merged = self.clone();
        for (dx, dy) in shape.filled_cells() {
            merged.set(position.x + dx, position.y + dy, Cell::filled(color));
        }
        merged
    }

    /// Remove every full row in place and shift the rest down.
    ///
    /// Returns the indices (pre-clear, top to bottom) of the removed rows.
    /// Two-pointer compaction from the bottom up, then the vacated top rows
    /// are emptied.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, GRID_HEIGHT> {
        let mut cleared = ArrayVec::new();
        let mut write = GRID_HEIGHT;

        for read in (0..GRID_HEIGHT).rev() {
            if self.is_row_full(read) {
                cleared.push(read);
                continue;
            }
            write -= 1;
            if write != read {
                self.rows[write] = self.rows[read];
            }
        }

        for row in &mut self.rows[..write] {
            *row = [Cell::EMPTY; GRID_WIDTH];
        }

        cleared.reverse();
        cleared
    }

    /// Functional form of [`Grid::clear_full_rows`]: `(new_grid, lines_cleared)`
    pub fn clear_lines(&self) -> (Grid, usize) {
        let mut next = self.clone();
        let cleared = next.clear_full_rows().len();
        (next, cleared)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
