//! Reducer module - the engine's state transitions
//!
//! Every operation is a total function from a state (plus, where a piece may
//! spawn, the bag) to a [`Step`]: the replacement state and the events the
//! transition produced. Guarded no-ops return an unchanged copy and no events.
//!
//! Lifecycle of a piece: spawn at (3, -2), fall, lock, clear lines, spawn
//! the next one. A lock while the piece's top is still above the field ends
//! the game instead.

use rand::Rng;
use tracing::debug;

use crate::bag::Bag;
use crate::game_state::{ActivePiece, GameState};
use crate::grid::Position;
use crate::pieces::tetromino;
use crate::scoring::{level_for_lines, line_clear_score};
use crate::types::{GameAction, GameEvent};

/// Horizontal direction for [`move_piece`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    pub fn dx(self) -> i32 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Result of one engine operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Step {
    fn unchanged(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }

    fn with_event(state: GameState, event: GameEvent) -> Self {
        Self {
            state,
            events: vec![event],
        }
    }
}

/// The current piece, if the state accepts piece operations
fn playable_piece(state: &GameState) -> Option<ActivePiece> {
    state.is_playable().then_some(state.current_piece).flatten()
}

/// Shift the current piece one column. Emits `Move` on success.
pub fn move_piece(state: &GameState, shift: Shift) -> Step {
    let Some(piece) = playable_piece(state) else {
        return Step::unchanged(state);
    };

    let target = piece.position.offset(shift.dx(), 0);
    if state.grid.collides(&piece.tetromino.shape, target) {
        return Step::unchanged(state);
    }

    let mut next = state.clone();
    next.current_piece = Some(ActivePiece {
        position: target,
        ..piece
    });
    Step::with_event(next, GameEvent::Move)
}

/// Rotate the current piece 90° clockwise in place. Emits `Rotate` on success.
///
/// A rotation that would collide is rejected; no kicks are tried.
pub fn rotate(state: &GameState) -> Step {
    let Some(piece) = playable_piece(state) else {
        return Step::unchanged(state);
    };

    let turned = piece.tetromino.rotated();
    if state.grid.collides(&turned.shape, piece.position) {
        return Step::unchanged(state);
    }

    let mut next = state.clone();
    next.current_piece = Some(ActivePiece {
        tetromino: turned,
        rotation: (piece.rotation + 1) % 4,
        ..piece
    });
    Step::with_event(next, GameEvent::Rotate)
}

/// Move the current piece down one row, or lock it if it cannot fall.
///
/// This is also the gravity tick.
pub fn soft_drop<R: Rng>(state: &GameState, bag: &mut Bag<R>) -> Step {
    let Some(piece) = playable_piece(state) else {
        return Step::unchanged(state);
    };

    let below = piece.position.offset(0, 1);
    if !state.grid.collides(&piece.tetromino.shape, below) {
        let mut next = state.clone();
        next.current_piece = Some(ActivePiece {
            position: below,
            ..piece
        });
        return Step {
            state: next,
            events: Vec::new(),
        };
    }

    let mut events = Vec::new();
    let state = lock_piece(state, piece, bag, &mut events);
    Step { state, events }
}

/// Drop the current piece to its landing row and lock it.
///
/// Emits `Drop` followed by the lock's events.
pub fn hard_drop<R: Rng>(state: &GameState, bag: &mut Bag<R>) -> Step {
    let Some(mut piece) = playable_piece(state) else {
        return Step::unchanged(state);
    };

    piece.position = landing_position(state, &piece);

    let mut events = vec![GameEvent::Drop];
    let state = lock_piece(state, piece, bag, &mut events);
    Step { state, events }
}

/// Flip the pause flag. Not guarded: a finished game can still be paused.
pub fn toggle_pause(state: &GameState) -> Step {
    let mut next = state.clone();
    next.is_paused = !next.is_paused;
    Step {
        state: next,
        events: Vec::new(),
    }
}

/// Discard everything and start over with two fresh draws
pub fn restart<R: Rng>(bag: &mut Bag<R>) -> GameState {
    GameState::fresh(bag)
}

/// State to start a session with: `saved` verbatim if it is a game in
/// progress, otherwise a fresh game.
pub fn initial_state<R: Rng>(saved: Option<GameState>, bag: &mut Bag<R>) -> GameState {
    match saved {
        Some(state) if !state.is_game_over => state,
        _ => GameState::fresh(bag),
    }
}

/// Dispatch a semantic input action
pub fn apply<R: Rng>(state: &GameState, action: GameAction, bag: &mut Bag<R>) -> Step {
    match action {
        GameAction::MoveLeft => move_piece(state, Shift::Left),
        GameAction::MoveRight => move_piece(state, Shift::Right),
        GameAction::Rotate => rotate(state),
        GameAction::SoftDrop => soft_drop(state, bag),
        GameAction::HardDrop => hard_drop(state, bag),
        GameAction::TogglePause => toggle_pause(state),
        GameAction::Restart => Step {
            state: restart(bag),
            events: Vec::new(),
        },
    }
}

/// Where the current piece would land if hard-dropped now
pub fn ghost_position(state: &GameState) -> Option<Position> {
    state
        .current_piece
        .as_ref()
        .map(|piece| landing_position(state, piece))
}

fn landing_position(state: &GameState, piece: &ActivePiece) -> Position {
    let shape = &piece.tetromino.shape;
    let mut position = piece.position;
    // Shapes always have a filled cell, so the floor stops this
    while !state.grid.collides(shape, position.offset(0, 1)) {
        position = position.offset(0, 1);
    }
    position
}

/// Merge `piece`, then either end the game or clear lines and spawn.
fn lock_piece<R: Rng>(
    state: &GameState,
    piece: ActivePiece,
    bag: &mut Bag<R>,
    events: &mut Vec<GameEvent>,
) -> GameState {
    if piece.position.y < 0 {
        debug!(
            kind = piece.tetromino.kind.as_str(),
            x = piece.position.x,
            y = piece.position.y,
            score = state.score,
            "piece locked above the field, game over"
        );
        events.push(GameEvent::GameOver);
        let mut over = state.clone();
        over.current_piece = Some(piece);
        over.is_game_over = true;
        return over;
    }

    let mut grid = state
        .grid
        .merge(&piece.tetromino.shape, piece.position, piece.tetromino.color);
    let cleared = grid.clear_full_rows().len();
    events.extend(std::iter::repeat_n(GameEvent::Clear, cleared));

    let score = state
        .score
        .saturating_add(line_clear_score(cleared, state.level));
    let lines_cleared = state.lines_cleared.saturating_add(cleared as u32);
    let level = state.level.max(level_for_lines(lines_cleared));
    if level > state.level {
        events.push(GameEvent::LevelUp);
    }

    let promoted = state.next_piece.unwrap_or_else(|| tetromino(bag.draw()));
    let next_piece = tetromino(bag.draw());

    debug!(
        kind = piece.tetromino.kind.as_str(),
        x = piece.position.x,
        y = piece.position.y,
        cleared,
        score,
        level,
        "piece locked"
    );

    GameState {
        grid,
        current_piece: Some(ActivePiece::spawn(promoted)),
        next_piece: Some(next_piece),
        score,
        level,
        lines_cleared,
        is_game_over: false,
        is_paused: state.is_paused,
    }
}
