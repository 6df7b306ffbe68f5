// Game rules: characters and the battle itself

pub mod battle;
pub mod characters;

pub use characters::Difficulty;
