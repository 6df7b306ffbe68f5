// Character profiles and the problem-source capability

use rand_pcg::Pcg32;

use super::problem::{Difficulty, Problem, ProblemGenerator};
use super::stats::CharacterStats;

/// Anything that can hand out problems for a difficulty tier
pub trait ProblemSource {
    fn generate_problem(&self, difficulty: Difficulty, rng: &mut Pcg32) -> Problem;
}

/// A playable character: pure data plus a problem generator
#[derive(Debug, Clone, Copy)]
pub struct Character {
    /// Name exchanged with the peer
    pub name: &'static str,
    pub stats: CharacterStats,
    generator: ProblemGenerator,
}

impl Character {
    pub const fn new(name: &'static str, stats: CharacterStats, generator: ProblemGenerator) -> Self {
        Self {
            name,
            stats,
            generator,
        }
    }

    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    pub fn combo_duration(&self) -> f32 {
        self.stats.combo_duration
    }

    pub fn damage_table(&self) -> [f32; 3] {
        self.stats.damage
    }

    pub fn special_gain_table(&self) -> [f32; 3] {
        self.stats.special_gain
    }
}

impl ProblemSource for Character {
    fn generate_problem(&self, difficulty: Difficulty, rng: &mut Pcg32) -> Problem {
        (self.generator)(difficulty, rng)
    }
}
