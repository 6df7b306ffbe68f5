// Character system
//
// This module contains everything related to playable characters:
// - Character profiles and the problem-source capability
// - Character stats (health, combo window, damage and gauge tables)
// - Problem generation per difficulty tier
// - The built-in roster, selected by name

pub mod character;
pub mod problem;
pub mod roster;
pub mod stats;

// Re-export commonly used types
pub use character::{Character, ProblemSource};
pub use problem::{Difficulty, Problem};
#[allow(unused_imports)]
pub use stats::CharacterStats;

/// Character lookup errors
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),
}
