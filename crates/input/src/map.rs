//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Commands handled by the host rather than the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Quit,
    ToggleMute,
}

/// Whether the event is a press or an OS auto-repeat (not a release)
fn is_down(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Map keyboard input to game actions.
///
/// Arrows, hjkl and wasd all move; space hard-drops.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if !is_down(&key) || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let action = match key.code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Up => GameAction::Rotate,
        KeyCode::Down => GameAction::SoftDrop,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' | 'a' => GameAction::MoveLeft,
            'l' | 'd' => GameAction::MoveRight,
            'k' | 'w' => GameAction::Rotate,
            'j' | 's' => GameAction::SoftDrop,
            ' ' => GameAction::HardDrop,
            'p' => GameAction::TogglePause,
            'r' => GameAction::Restart,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Map keyboard input to host commands: `q`/Ctrl-C quit, `m` mute.
pub fn host_command(key: KeyEvent) -> Option<HostCommand> {
    if !is_down(&key) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HostCommand::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(HostCommand::Quit),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(HostCommand::ToggleMute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(handle_key_event(key(KeyCode::Right)), Some(GameAction::MoveRight));
        assert_eq!(handle_key_event(key(KeyCode::Down)), Some(GameAction::SoftDrop));
        assert_eq!(handle_key_event(key(KeyCode::Char('H'))), Some(GameAction::MoveLeft));
        assert_eq!(handle_key_event(key(KeyCode::Char('d'))), Some(GameAction::MoveRight));
        assert_eq!(handle_key_event(key(KeyCode::Char('J'))), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Up)), Some(GameAction::Rotate));
        assert_eq!(handle_key_event(key(KeyCode::Char('k'))), Some(GameAction::Rotate));
        assert_eq!(handle_key_event(key(KeyCode::Char('W'))), Some(GameAction::Rotate));
        // No counter-clockwise rotation
        assert_eq!(handle_key_event(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char(' '))), Some(GameAction::HardDrop));
        assert_eq!(handle_key_event(key(KeyCode::Char('p'))), Some(GameAction::TogglePause));
        assert_eq!(handle_key_event(key(KeyCode::Char('R'))), Some(GameAction::Restart));
    }

    #[test]
    fn test_release_and_repeat() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);

        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            ..release
        };
        assert_eq!(handle_key_event(repeat), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_host_commands() {
        assert_eq!(host_command(key(KeyCode::Char('q'))), Some(HostCommand::Quit));
        assert_eq!(
            host_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(HostCommand::Quit)
        );
        assert_eq!(host_command(key(KeyCode::Char('m'))), Some(HostCommand::ToggleMute));
        assert_eq!(host_command(key(KeyCode::Char('c'))), None);
        assert_eq!(host_command(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_is_not_a_game_action() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            None
        );
    }
}
