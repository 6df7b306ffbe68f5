// Character stats - each character trades health for damage and gauge gain

/// Per-character balance numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    /// Health at the start of every round
    pub max_health: f32,
    /// Seconds a combo survives without another correct answer
    pub combo_duration: f32,
    /// Base damage per correct answer, indexed by difficulty
    pub damage: [f32; 3],
    /// Own special gauge gain per correct answer, indexed by difficulty
    pub special_gain: [f32; 3],
}

/// Stats used when nothing else is specified
pub const BASE_STATS: CharacterStats = CharacterStats {
    max_health: 100.0,
    combo_duration: 4.0,
    damage: [5.0, 10.0, 18.0],
    special_gain: [0.05, 0.10, 0.18],
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::Difficulty;

    #[test]
    fn test_default_stats() {
        let stats = CharacterStats::default();
        assert_eq!(stats.max_health, 100.0);
        assert_eq!(stats.damage[Difficulty::Medium.index()], 10.0);
        assert_eq!(stats.special_gain[Difficulty::Hard.index()], 0.18);
    }

    #[test]
    fn test_harder_tiers_pay_more() {
        let stats = CharacterStats::default();
        for pair in Difficulty::ALL.windows(2) {
            let (lo, hi) = (pair[0].index(), pair[1].index());
            assert!(stats.damage[lo] < stats.damage[hi]);
            assert!(stats.special_gain[lo] < stats.special_gain[hi]);
        }
    }
}
