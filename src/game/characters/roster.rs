// Built-in characters, looked up by the name peers exchange

use super::character::Character;
use super::problem;
use super::stats::CharacterStats;
use super::CharacterError;

/// Balanced all-rounder
pub const ADDER: Character = Character::new(
    "Adder",
    CharacterStats {
        max_health: 100.0,
        combo_duration: 4.0,
        damage: [5.0, 10.0, 18.0],
        special_gain: [0.05, 0.10, 0.18],
    },
    problem::addition,
);

/// Glass cannon: less health, harder hits, shorter combo window
pub const MULTIPLIER: Character = Character::new(
    "Multiplier",
    CharacterStats {
        max_health: 90.0,
        combo_duration: 3.5,
        damage: [6.0, 12.0, 20.0],
        special_gain: [0.04, 0.08, 0.15],
    },
    problem::multiplication,
);

/// Tank: more health, softer hits, fast special
pub const DIVIDER: Character = Character::new(
    "Divider",
    CharacterStats {
        max_health: 110.0,
        combo_duration: 5.0,
        damage: [4.0, 9.0, 16.0],
        special_gain: [0.06, 0.11, 0.20],
    },
    problem::division,
);

const ROSTER: [Character; 3] = [ADDER, MULTIPLIER, DIVIDER];

/// Find a character by name (case-sensitive, as sent on the wire)
pub fn lookup(name: &str) -> Result<Character, CharacterError> {
    ROSTER
        .iter()
        .find(|c| c.name == name)
        .copied()
        .ok_or_else(|| CharacterError::UnknownCharacter(name.to_string()))
}

/// Names of every selectable character
pub fn names() -> impl Iterator<Item = &'static str> {
    ROSTER.iter().map(|c| c.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known() {
        assert_eq!(lookup("Adder").unwrap().name, "Adder");
        assert_eq!(lookup("Divider").unwrap().max_health(), 110.0);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("adder").unwrap_err();
        assert_eq!(err.to_string(), "Unknown character: adder");
    }

    #[test]
    fn test_names_are_unique() {
        let all: Vec<_> = names().collect();
        assert_eq!(all.len(), 3);
        for name in &all {
            assert_eq!(all.iter().filter(|n| *n == name).count(), 1);
        }
    }
}
