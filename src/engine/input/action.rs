// Keypad action definitions and key mappings

use crate::game::Difficulty;

/// Everything the player can do on the answer pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Answer entry
    Digit(u8),
    Backspace,
    Submit,

    // Battle controls
    SelectDifficulty(Difficulty),
    UseSpecial,
}

/// Default keyboard bindings
///
/// Digits type into the answer, Enter submits, E/M/H pick the difficulty
/// tier and Space fires the special move.
pub fn action_for_key(key: char) -> Option<Action> {
    match key {
        '0'..='9' => key.to_digit(10).map(|d| Action::Digit(d as u8)),
        '\u{8}' | '\u{7f}' => Some(Action::Backspace),
        '\n' | '\r' => Some(Action::Submit),
        'e' | 'E' => Some(Action::SelectDifficulty(Difficulty::Easy)),
        'm' | 'M' => Some(Action::SelectDifficulty(Difficulty::Medium)),
        'h' | 'H' => Some(Action::SelectDifficulty(Difficulty::Hard)),
        ' ' => Some(Action::UseSpecial),
        _ => None,
    }
}

/// Map a whole typed string (e.g. "42\n") to actions, skipping unbound keys
pub fn actions_for_text(text: &str) -> Vec<Action> {
    text.chars().filter_map(action_for_key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_bindings() {
        assert_eq!(action_for_key('0'), Some(Action::Digit(0)));
        assert_eq!(action_for_key('7'), Some(Action::Digit(7)));
    }

    #[test]
    fn test_control_bindings() {
        assert_eq!(action_for_key('\n'), Some(Action::Submit));
        assert_eq!(action_for_key('\u{8}'), Some(Action::Backspace));
        assert_eq!(action_for_key(' '), Some(Action::UseSpecial));
        assert_eq!(
            action_for_key('H'),
            Some(Action::SelectDifficulty(Difficulty::Hard))
        );
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(action_for_key('x'), None);
        assert_eq!(action_for_key('-'), None);
    }

    #[test]
    fn test_actions_for_text() {
        assert_eq!(
            actions_for_text("12x\n"),
            vec![Action::Digit(1), Action::Digit(2), Action::Submit]
        );
    }
}
