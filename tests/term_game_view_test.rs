//! GameView tests through the public term API

use blockfall::core::{Bag, Cell, GameState};
use blockfall::term::{GameView, Hud, Viewport};
use blockfall::types::Color;

fn fresh() -> GameState {
    GameState::fresh(&mut Bag::seeded(6))
}

#[test]
fn test_border_fills_a_tight_viewport() {
    let fb = GameView::default().render(&fresh(), &Hud::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).map(|g| g.ch), Some('┌'));
    assert_eq!(fb.get(21, 0).map(|g| g.ch), Some('┐'));
    assert_eq!(fb.get(0, 21).map(|g| g.ch), Some('└'));
    assert_eq!(fb.get(21, 21).map(|g| g.ch), Some('┘'));
}

#[test]
fn test_locked_cell_is_two_columns_wide() {
    let mut state = fresh();
    state.grid.set(0, 19, Cell::filled(Color::Red));
    let fb = GameView::default().render(&state, &Hud::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(1, 20).map(|g| g.ch), Some('█'));
    assert_eq!(fb.get(2, 20).map(|g| g.ch), Some('█'));
    assert_ne!(fb.get(3, 20).map(|g| g.ch), Some('█'));
}

#[test]
fn test_game_over_overlay_mentions_restart() {
    let mut state = fresh();
    state.is_game_over = true;
    let hud = Hud {
        new_high_score: true,
        ..Hud::default()
    };
    let fb = GameView::default().render(&state, &hud, Viewport::new(60, 24));

    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("NEW HIGH SCORE!"));
    assert!(fb.contains_text("R TO RESTART"));
}
