//! Pieces module - tetromino templates and matrix rotation
//!
//! Every piece is a square 0/1 matrix (2x2 for O, 4x4 for I, 3x3 otherwise).
//! Rotation is a plain clockwise matrix rotation; there are no kick tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Color, TetrominoType};

/// Largest supported shape matrix (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Smallest supported shape matrix (the O piece)
pub const MIN_SHAPE_SIZE: usize = 2;

/// Reasons a matrix cannot be used as a piece shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape size {0} is outside {MIN_SHAPE_SIZE}..={MAX_SHAPE_SIZE}")]
    BadSize(usize),
    #[error("shape row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("shape cell value {0} is not 0 or 1")]
    BadCell(u8),
    #[error("shape has no filled cells")]
    Empty,
}

/// A square occupancy matrix of size 2-4
///
/// Stored in a fixed 4x4 array; only the top-left `size` x `size` block is used.
/// Serialized as nested arrays of 0/1, e.g. `[[1,1],[1,1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from a square 0/1 matrix.
    ///
    /// Usable in const context so the templates below are compile-time values.
    pub const fn from_square<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N >= MIN_SHAPE_SIZE && N <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at (row, col) is part of the piece.
    /// Out-of-range coordinates are never filled.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Offsets `(dx, dy)` of every filled cell, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i32, row as i32))
        })
    }

    /// Rotate 90° clockwise: `new[i][j] = old[n-1-j][i]`.
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Shape {
            size: self.size,
            cells,
        }
    }

    /// Matrix as nested 0/1 rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let n = self.size();
        (0..n)
            .map(|row| (0..n).map(|col| self.cells[row][col] as u8).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        if !(MIN_SHAPE_SIZE..=MAX_SHAPE_SIZE).contains(&size) {
            return Err(ShapeError::BadSize(size));
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ShapeError::NotSquare {
                    row: r,
                    len: row.len(),
                    size,
                });
            }
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = match v {
                    0 => false,
                    1 => true,
                    other => return Err(ShapeError::BadCell(other)),
                };
            }
        }

        if !cells.iter().flatten().any(|&filled| filled) {
            return Err(ShapeError::Empty);
        }

        Ok(Self {
            size: size as u8,
            cells,
        })
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape.to_rows()
    }
}

/// Immutable piece template: shape, color and type
///
/// Serialized with the field names `shape`, `color` and `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetromino {
    pub shape: Shape,
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: TetrominoType,
}

impl Tetromino {
    /// Same piece with its shape turned 90° clockwise
    pub fn rotated(&self) -> Tetromino {
        Tetromino {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

const I_PIECE: Tetromino = Tetromino {
    shape: Shape::from_square([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    color: Color::Cyan,
    kind: TetrominoType::I,
};

const O_PIECE: Tetromino = Tetromino {
    shape: Shape::from_square([[1, 1], [1, 1]]),
    color: Color::Yellow,
    kind: TetrominoType::O,
};

const T_PIECE: Tetromino = Tetromino {
    shape: Shape::from_square([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    color: Color::Purple,
    kind: TetrominoType::T,
};

const S_PIECE: Tetromino = Tetromino {
    shape: Shape::from_square([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    color: Color::Green,
    kind: TetrominoType::S,
};

const Z_PIECE: Tetromino = Tetromino {
    shape: Shape::from_square([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    color: Color::Red,
    kind: TetrominoType::Z,
};

const J_PIECE: Tetromino = Tetromino {
    shape: Shape::from_square([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    color: Color::Blue,
    kind: TetrominoType::J,
};

const L_PIECE: Tetromino = Tetromino {
    shape: Shape::from_square([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    color: Color::Orange,
    kind: TetrominoType::L,
};

/// Get the spawn template for a tetromino type
pub fn tetromino(kind: TetrominoType) -> Tetromino {
    match kind {
        TetrominoType::I => I_PIECE,
        TetrominoType::O => O_PIECE,
        TetrominoType::T => T_PIECE,
        TetrominoType::S => S_PIECE,
        TetrominoType::Z => Z_PIECE,
        TetrominoType::J => J_PIECE,
        TetrominoType::L => L_PIECE,
    }
}
