// Combo streak with a decaying countdown

/// Consecutive-correct-answer streak
///
/// Every correct answer bumps the streak and refills the countdown; the
/// streak is lost when the countdown runs out or an answer is wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComboTimer {
    combo: u32,
    remaining: f32,
}

impl ComboTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current streak
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Seconds left before the streak expires
    #[cfg(test)]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count a correct answer, returns the post-increment combo
    pub fn on_correct_answer(&mut self, combo_duration: f32) -> u32 {
        self.combo += 1;
        self.remaining = combo_duration.max(0.0);
        self.combo
    }

    /// Advance the countdown
    ///
    /// Returns true when this tick expired a live combo.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining > 0.0 {
            self.remaining -= dt;
        }
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return self.reset();
        }
        false
    }

    /// Drop the streak, returns true if there was one
    pub fn reset(&mut self) -> bool {
        let had_combo = self.combo > 0;
        self.combo = 0;
        self.remaining = 0.0;
        had_combo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_correct_answer_increments() {
        let mut timer = ComboTimer::new();
        assert_eq!(timer.on_correct_answer(3.0), 1);
        assert_eq!(timer.on_correct_answer(3.0), 2);
        assert_relative_eq!(timer.remaining(), 3.0);
    }

    #[test]
    fn test_tick_counts_down() {
        let mut timer = ComboTimer::new();
        timer.on_correct_answer(1.0);
        assert!(!timer.tick(0.25));
        assert_relative_eq!(timer.remaining(), 0.75);
        assert_eq!(timer.combo(), 1);
    }

    #[test]
    fn test_expiry_resets_combo() {
        let mut timer = ComboTimer::new();
        timer.on_correct_answer(0.5);
        timer.on_correct_answer(0.5);
        assert!(!timer.tick(0.3));
        assert!(timer.tick(0.3));
        assert_eq!(timer.combo(), 0);
        assert_eq!(timer.remaining(), 0.0);

        // Nothing left to expire
        assert!(!timer.tick(0.3));
    }

    #[test]
    fn test_correct_answer_refills_timer() {
        let mut timer = ComboTimer::new();
        timer.on_correct_answer(1.0);
        timer.tick(0.9);
        timer.on_correct_answer(1.0);
        assert!(!timer.tick(0.9));
        assert_eq!(timer.combo(), 2);
    }

    #[test]
    fn test_reset() {
        let mut timer = ComboTimer::new();
        assert!(!timer.reset());
        timer.on_correct_answer(2.0);
        assert!(timer.reset());
        assert_eq!(timer, ComboTimer::default());
    }

    proptest! {
        #[test]
        fn prop_streak_counts_each_correct_answer(answers in 1u32..50) {
            let mut timer = ComboTimer::new();
            for expected in 1..=answers {
                prop_assert_eq!(timer.on_correct_answer(2.0), expected);
                timer.tick(0.1);
            }
            timer.reset();
            prop_assert_eq!(timer.combo(), 0);
        }

        #[test]
        fn prop_remaining_never_negative(dts in proptest::collection::vec(0.0f32..1.0, 1..40)) {
            let mut timer = ComboTimer::new();
            timer.on_correct_answer(1.5);
            for dt in dts {
                timer.tick(dt);
                prop_assert!(timer.remaining() >= 0.0);
                if timer.remaining() == 0.0 {
                    prop_assert_eq!(timer.combo(), 0);
                }
            }
        }
    }
}
