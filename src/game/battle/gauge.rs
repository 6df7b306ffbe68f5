// Gauge and damage computation for correct answers

use crate::core::math::clamp01;
use crate::core::BattleConfig;
use crate::game::characters::{Character, Difficulty};

/// What one correct answer is worth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerEffect {
    /// Added to the answering player's special gauge
    pub special_gain: f32,
    /// Subtracted from the opponent's health
    pub damage: f32,
    /// Added to the opponent's special gauge (taking damage builds meter)
    pub opponent_special_gain: f32,
}

/// Pure damage/gauge formulas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeEngine {
    combo_multiplier: f32,
    damage_to_special_divisor: f32,
}

impl GaugeEngine {
    pub fn new(combo_multiplier: f32, damage_to_special_divisor: f32) -> Self {
        Self {
            combo_multiplier,
            damage_to_special_divisor,
        }
    }

    pub fn from_config(config: &BattleConfig) -> Self {
        Self::new(config.combo_multiplier, config.damage_to_special_divisor)
    }

    /// Damage for a tier at a given (post-increment) combo
    pub fn damage(&self, base_damage: f32, combo: u32) -> f32 {
        (base_damage * (1.0 + combo as f32 * self.combo_multiplier)).max(0.0)
    }

    /// Effect of a correct answer at `difficulty`, with `combo` already
    /// counting this answer
    pub fn apply_correct_answer(
        &self,
        character: &Character,
        difficulty: Difficulty,
        combo: u32,
    ) -> AnswerEffect {
        let tier = difficulty.index();
        let damage = self.damage(character.damage_table()[tier], combo);
        AnswerEffect {
            special_gain: clamp01(character.special_gain_table()[tier]),
            damage,
            opponent_special_gain: clamp01(damage / self.damage_to_special_divisor),
        }
    }
}

impl Default for GaugeEngine {
    fn default() -> Self {
        Self::from_config(&BattleConfig::default())
    }
}

/// A special gauge saturating at 1.0 with a one-shot "became full" edge
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpecialGauge {
    value: f32,
    full: bool,
}

impl SpecialGauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Add to the gauge, returns true only on the tick it crosses into full
    pub fn add(&mut self, delta: f32) -> bool {
        self.set(self.value + delta)
    }

    /// Overwrite the gauge, returns true only on the tick it crosses into full
    pub fn set(&mut self, value: f32) -> bool {
        self.value = clamp01(value);
        let was_full = self.full;
        self.full = self.value >= 1.0;
        self.full && !was_full
    }

    /// Empty the gauge (re-arms the full edge)
    pub fn drain(&mut self) {
        self.value = 0.0;
        self.full = false;
    }
}
