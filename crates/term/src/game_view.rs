//! GameView: maps a `GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The active piece and its landing ghost are overlaid at draw time; the
//! grid itself only ever holds locked cells.

use crate::core::{reducer, GameState, Position, Shape};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Color, GRID_HEIGHT, GRID_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Session-level facts shown next to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub high_score: u32,
    pub new_high_score: bool,
    pub level_up: bool,
    pub muted: bool,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Largest board cell, in terminal columns or rows
pub const MAX_CELL_SIZE: u16 = 8;

/// Board and side panel layout
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares the cells on typical terminal fonts
        Self::new(2, 1)
    }
}

/// Board placement inside the viewport, in terminal coordinates
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    /// Cell sizes are clamped to `1..=MAX_CELL_SIZE`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_SIZE),
            cell_h: cell_h.clamp(1, MAX_CELL_SIZE),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, state: &GameState, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let frame = self.frame(viewport);
        let board = Style::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', board);
        draw_border(fb, frame, Style::new(Rgb::new(200, 200, 200), PANEL_BG));

        for (y, row) in state.grid.rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as i32, y as i32);
                match cell.color.filter(|_| cell.filled) {
                    Some(color) => self.draw_block(fb, frame, x, y, color),
                    None => {
                        let dot = Style::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
                        self.fill_board_cell(fb, frame, x, y, '·', dot);
                    }
                }
            }
        }

        if let Some(piece) = state.current_piece {
            let shape = &piece.tetromino.shape;
            if !state.is_game_over {
                if let Some(ghost) = reducer::ghost_position(state) {
                    let style = Style::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                    for (x, y) in cells_at(shape, ghost) {
                        self.fill_board_cell(fb, frame, x, y, '░', style);
                    }
                }
            }
            for (x, y) in cells_at(shape, piece.position) {
                self.draw_block(fb, frame, x, y, piece.tetromino.color);
            }
        }

        self.draw_side_panel(fb, state, hud, viewport, frame);

        if state.is_game_over {
            let mid = frame.y + frame.h / 2;
            draw_centered(fb, frame, mid.saturating_sub(1), "GAME OVER");
            if hud.new_high_score {
                draw_centered(fb, frame, mid, "NEW HIGH SCORE!");
            }
            draw_centered(fb, frame, mid + 1, "R TO RESTART");
        } else if state.is_paused {
            draw_centered(fb, frame, frame.y + frame.h / 2, "PAUSED");
        } else if hud.level_up {
            draw_centered(fb, frame, frame.y + 2, "LEVEL UP!");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, hud, viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (GRID_WIDTH as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (GRID_HEIGHT as u16).saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;
        Frame { x, y, w, h }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, color: Color) {
        let style = Style::new(Rgb::for_piece(color), BOARD_BG).bold();
        self.fill_board_cell(fb, frame, x, y, '█', style);
    }

    /// Fill one grid square; squares outside the field are skipped.
    fn fill_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, ch: char, style: Style) {
        if !GameState::in_field(x, y) {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, state: &GameState, hud: &Hud, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", state.score),
            ("HIGH SCORE", hud.high_score),
            // Players count levels from 1
            ("LEVEL", state.level.saturating_add(1)),
            ("LINES", state.lines_cleared),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = state.next_piece {
            let style = Style::new(Rgb::for_piece(next.color), PANEL_BG).bold();
            for (dx, dy) in next.shape.filled_cells() {
                let px = panel_x + dx as u16 * self.cell_w;
                fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
            }
        }
        y = y.saturating_add(5);

        let sound = if hud.muted { "SOUND OFF" } else { "SOUND ON" };
        fb.put_str(panel_x, y, sound, value.dim());
    }
}

/// Absolute coordinates of `shape` placed at `position`
fn cells_at(shape: &Shape, position: Position) -> impl Iterator<Item = (i32, i32)> + '_ {
    shape
        .filled_cells()
        .map(move |(dx, dy)| (position.x + dx, position.y + dy))
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: Style) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

    fb.put_char(f.x, f.y, '┌', style);
    fb.put_char(right, f.y, '┐', style);
    fb.put_char(f.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, f: Frame, y: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
    let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}
