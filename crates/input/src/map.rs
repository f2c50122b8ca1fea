//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(GameCommand),
    /// Leave the debug page of the menu.
    MenuBack,
    Quit,
}

/// Map keyboard input to an action.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyAction::Quit);
    }

    let command = match key.code {
        KeyCode::Esc => GameCommand::TogglePause,

        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => GameCommand::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => GameCommand::MoveRight,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => GameCommand::SoftDrop,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('r')
        | KeyCode::Char('R') => GameCommand::Rotate,

        KeyCode::Enter => GameCommand::Place,
        KeyCode::Char('h') | KeyCode::Char('H') => GameCommand::ToggleHint,
        KeyCode::Char('n') | KeyCode::Char('N') => GameCommand::SpawnNext,

        // Menu
        KeyCode::Backspace => GameCommand::Restart,
        KeyCode::F(1) => GameCommand::DebugDump,
        KeyCode::Char('b') | KeyCode::Char('B') => return Some(KeyAction::MenuBack),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(KeyAction::Quit),

        _ => return None,
    };
    Some(KeyAction::Command(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<KeyAction> {
        map_key(KeyEvent::from(code))
    }

    fn cmd(command: GameCommand) -> Option<KeyAction> {
        Some(KeyAction::Command(command))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), cmd(GameCommand::MoveLeft));
        assert_eq!(key(KeyCode::Char('A')), cmd(GameCommand::MoveLeft));
        assert_eq!(key(KeyCode::Right), cmd(GameCommand::MoveRight));
        assert_eq!(key(KeyCode::Char('d')), cmd(GameCommand::MoveRight));
        assert_eq!(key(KeyCode::Down), cmd(GameCommand::SoftDrop));
        assert_eq!(key(KeyCode::Char('s')), cmd(GameCommand::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), cmd(GameCommand::Rotate));
        assert_eq!(key(KeyCode::Char('w')), cmd(GameCommand::Rotate));
        assert_eq!(key(KeyCode::Char('R')), cmd(GameCommand::Rotate));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Enter), cmd(GameCommand::Place));
        assert_eq!(key(KeyCode::Char('h')), cmd(GameCommand::ToggleHint));
        assert_eq!(key(KeyCode::Char('N')), cmd(GameCommand::SpawnNext));
        assert_eq!(key(KeyCode::Esc), cmd(GameCommand::TogglePause));
        assert_eq!(key(KeyCode::Backspace), cmd(GameCommand::Restart));
        assert_eq!(key(KeyCode::F(1)), cmd(GameCommand::DebugDump));
        assert_eq!(key(KeyCode::Char('b')), Some(KeyAction::MenuBack));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), Some(KeyAction::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(key(KeyCode::Char('c')), None);
    }
}
