// Per-player battle state

use super::combo::ComboTimer;
use super::gauge::SpecialGauge;
use crate::core::math::{clamp, clamp01};

/// Health, special gauge and combo of one player
///
/// A client holds two of these: its own (locally authoritative) and a mirror
/// of the opponent that only received messages and local attacks touch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBattleState {
    /// May dip below zero internally; use `display_health` for anything shown
    /// or sent
    pub health: f32,
    pub max_health: f32,
    pub special: SpecialGauge,
    pub combo: ComboTimer,
}

impl PlayerBattleState {
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(1.0);
        Self {
            health: max_health,
            max_health,
            special: SpecialGauge::new(),
            combo: ComboTimer::new(),
        }
    }

    /// Round reset: full health, no combo. The special gauge carries over.
    pub fn reset_for_round(&mut self) {
        self.health = self.max_health;
        self.combo.reset();
    }

    /// Health clamped into [0, max]
    pub fn display_health(&self) -> f32 {
        if self.health.is_nan() {
            return 0.0;
        }
        clamp(self.health, 0.0, self.max_health)
    }

    /// Residual health as a ratio in [0, 1]
    pub fn health_ratio(&self) -> f32 {
        clamp01(self.health / self.max_health)
    }

    pub fn is_knocked_out(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtract damage, returns the raw (possibly negative) result
    pub fn take_damage(&mut self, damage: f32) -> f32 {
        self.health -= damage.max(0.0);
        self.health
    }
}
