//! Grid tests - collision, merge and line clearing through the public API

use blockfall::core::{tetromino, Cell, Grid, Position};
use blockfall::types::{Color, TetrominoType, GRID_HEIGHT, GRID_WIDTH};

fn fill_row(grid: &mut Grid, y: i32, color: Color) {
    for x in 0..GRID_WIDTH as i32 {
        grid.set(x, y, Cell::filled(color));
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    for y in 0..GRID_HEIGHT as i32 {
        for x in 0..GRID_WIDTH as i32 {
            assert_eq!(grid.get(x, y), Some(Cell::EMPTY), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(GRID_WIDTH as i32, 0), None);
    assert_eq!(grid.get(0, GRID_HEIGHT as i32), None);
}

#[test]
fn test_every_template_fits_at_spawn() {
    let grid = Grid::new();
    for kind in TetrominoType::ALL {
        let piece = tetromino(kind);
        assert!(
            !grid.collides(&piece.shape, Position::new(3, -2)),
            "{:?} should fit at spawn",
            kind
        );
    }
}

#[test]
fn test_i_piece_fits_flush_right_but_not_beyond() {
    let grid = Grid::new();
    let i = tetromino(TetrominoType::I).shape;
    assert!(!grid.collides(&i, Position::new(6, 0)));
    assert!(grid.collides(&i, Position::new(7, 0)));
}

#[test]
fn test_spawn_allowance_still_checks_cells_inside_field() {
    let mut grid = Grid::new();
    grid.set(4, 0, Cell::filled(Color::Red));
    // T at (3, -1): bottom row of the shape is at y = 0 and hits (4, 0)
    let t = tetromino(TetrominoType::T).shape;
    assert!(grid.collides(&t, Position::new(3, -1)));
    // One row higher only the top cell remains, above the field
    assert!(!grid.collides(&t, Position::new(3, -2)));
}

#[test]
fn test_merge_never_mutates_input() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, Color::Blue);
    grid.set(0, 19, Cell::EMPTY);
    let before = grid.clone();

    let s = tetromino(TetrominoType::S);
    let merged = grid.merge(&s.shape, Position::new(2, 10), s.color);

    assert_eq!(grid, before);
    assert_ne!(merged, before);
    assert_eq!(merged.get(3, 10), Some(Cell::filled(Color::Green)));
    assert_eq!(merged.get(2, 11), Some(Cell::filled(Color::Green)));
}

#[test]
fn test_clear_rows_three_and_seven() {
    let mut grid = Grid::new();
    // Marker cells in every other row so order can be checked
    for y in 0..GRID_HEIGHT as i32 {
        grid.set(y % GRID_WIDTH as i32, y, Cell::filled(Color::Yellow));
    }
    fill_row(&mut grid, 3, Color::Red);
    fill_row(&mut grid, 7, Color::Red);

    let (cleared, count) = grid.clear_lines();
    assert_eq!(count, 2);

    // Two empty rows on top
    assert!(cleared.rows()[0].iter().all(|c| !c.filled));
    assert!(cleared.rows()[1].iter().all(|c| !c.filled));

    // Remaining rows keep their relative order
    let survivors: Vec<i32> = (0..GRID_HEIGHT as i32).filter(|&y| y != 3 && y != 7).collect();
    for (new_y, old_y) in (2..GRID_HEIGHT as i32).zip(survivors) {
        let marker_x = old_y % GRID_WIDTH as i32;
        assert!(
            cleared.is_occupied(marker_x, new_y),
            "row {} should have moved to {}",
            old_y,
            new_y
        );
    }
}

#[test]
fn test_clear_keeps_colors() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, Color::Red);
    grid.set(5, 18, Cell::filled(Color::Purple));

    let (cleared, count) = grid.clear_lines();
    assert_eq!(count, 1);
    assert_eq!(cleared.get(5, 19), Some(Cell::filled(Color::Purple)));
}

#[test]
fn test_clear_keeps_every_surviving_row_in_order() {
    let colors = [Color::Cyan, Color::Yellow, Color::Purple, Color::Green, Color::Orange];
    let mut grid = Grid::new();
    // Each row gets its own bit pattern of y + 1, so no two rows are alike
    for y in 0..GRID_HEIGHT as i32 {
        for bit in 0..5 {
            if (y + 1) & (1 << bit) != 0 {
                grid.set(bit, y, Cell::filled(colors[bit as usize]));
            }
        }
    }
    fill_row(&mut grid, 3, Color::Red);
    fill_row(&mut grid, 7, Color::Red);
    let before = *grid.rows();

    let (cleared, count) = grid.clear_lines();
    assert_eq!(count, 2);

    let expected: Vec<_> = before
        .iter()
        .enumerate()
        .filter(|&(y, _)| y != 3 && y != 7)
        .map(|(_, row)| *row)
        .collect();
    assert_eq!(&cleared.rows()[2..], expected.as_slice());
    assert!(cleared.rows()[..2].iter().flatten().all(|c| *c == Cell::EMPTY));
}
