//! Named input actions for key bindings and text commands.
//!
//! Actions go through the same entry points as direct calls, so they obey the
//! same preconditions: only `Reset` does anything once the game is over.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Unknown action: {0:?} (expected roll, hold or reset)")]
    Unknown(String),
}

/// A player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Roll,
    Hold,
    Reset,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Roll, Action::Hold, Action::Reset];

    /// Default key binding: R, H, N (case-insensitive).
    pub fn from_key(key: char) -> Option<Action> {
        match key.to_ascii_lowercase() {
            'r' => Some(Action::Roll),
            'h' => Some(Action::Hold),
            'n' => Some(Action::Reset),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Action::Roll => 'r',
            Action::Hold => 'h',
            Action::Reset => 'n',
        }
    }

    /// Whether the action can take effect once the game is over.
    pub fn allowed_after_game_over(self) -> bool {
        matches!(self, Action::Reset)
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Roll => "Roll",
            Action::Hold => "Hold",
            Action::Reset => "New game",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roll" | "r" => Ok(Action::Roll),
            "hold" | "h" => Ok(Action::Hold),
            "reset" | "new" | "n" => Ok(Action::Reset),
            _ => Err(ActionError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Action::from_key('r'), Some(Action::Roll));
        assert_eq!(Action::from_key('H'), Some(Action::Hold));
        assert_eq!(Action::from_key('N'), Some(Action::Reset));
        assert_eq!(Action::from_key('x'), None);
        for action in Action::ALL {
            assert_eq!(Action::from_key(action.key()), Some(action));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("roll".parse::<Action>(), Ok(Action::Roll));
        assert_eq!(" HOLD ".parse::<Action>(), Ok(Action::Hold));
        assert_eq!("new".parse::<Action>(), Ok(Action::Reset));
        assert_eq!(
            "jump".parse::<Action>(),
            Err(ActionError::Unknown("jump".to_string()))
        );
    }

    #[test]
    fn test_only_reset_after_game_over() {
        assert!(Action::Reset.allowed_after_game_over());
        assert!(!Action::Roll.allowed_after_game_over());
        assert!(!Action::Hold.allowed_after_game_over());
    }
}
