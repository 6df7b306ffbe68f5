// Displayed gauge smoothing

use super::player::PlayerBattleState;
use crate::core::math::step_toward;
use crate::core::BattleConfig;

/// Moves a displayed value toward its target by a bounded step per tick
pub struct BarAnimator;

impl BarAnimator {
    /// One tick of smoothing; snaps onto the target when within one step
    pub fn step(current: f32, target: f32, max_step: f32) -> f32 {
        step_toward(current, target, max_step)
    }
}

/// The four bars a client shows: both health bars and both special bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeBars {
    pub own_health: f32,
    pub own_special: f32,
    pub opponent_health: f32,
    pub opponent_special: f32,
}

impl GaugeBars {
    /// Bars resting at the given states' current values
    pub fn at_rest(own: &PlayerBattleState, opponent: &PlayerBattleState) -> Self {
        Self {
            own_health: own.display_health(),
            own_special: own.special.value(),
            opponent_health: opponent.display_health(),
            opponent_special: opponent.special.value(),
        }
    }

    /// Advance every bar one tick toward the (clamped) state values
    pub fn step(
        &mut self,
        own: &PlayerBattleState,
        opponent: &PlayerBattleState,
        config: &BattleConfig,
    ) {
        let health_step = config.health_bar_step;
        let special_step = config.special_bar_step;

        self.own_health = BarAnimator::step(self.own_health, own.display_health(), health_step);
        self.own_special = BarAnimator::step(self.own_special, own.special.value(), special_step);
        self.opponent_health =
            BarAnimator::step(self.opponent_health, opponent.display_health(), health_step);
        self.opponent_special =
            BarAnimator::step(self.opponent_special, opponent.special.value(), special_step);
    }

    #[cfg(test)]
    /// Check if every bar has reached the state values
    pub fn settled(&self, own: &PlayerBattleState, opponent: &PlayerBattleState) -> bool {
        *self == Self::at_rest(own, opponent)
    }
}
