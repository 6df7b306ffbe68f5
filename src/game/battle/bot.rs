// Scripted player for demos and soak tests

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::BattleSession;
use crate::engine::input::{actions_for_text, Action};

/// Types an answer every `interval_ticks` while the round is active,
/// right with probability `accuracy`, and fires the special as soon as it
/// is ready
#[derive(Debug, Clone)]
pub struct AnswerBot {
    interval_ticks: u32,
    accuracy: f64,
    rng: Pcg32,
    counter: u32,
}

impl AnswerBot {
    pub fn new(interval_ticks: u32, accuracy: f64, seed: u64) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            accuracy: accuracy.clamp(0.0, 1.0),
            rng: Pcg32::seed_from_u64(seed),
            counter: 0,
        }
    }

    /// Drive one tick worth of input into `session`
    pub fn act(&mut self, session: &mut BattleSession) {
        if session.has_left() || !session.phase().accepts_input() {
            self.counter = 0;
            return;
        }

        if session.own().special.is_full() {
            session.handle_action(Action::UseSpecial);
        }

        self.counter += 1;
        if self.counter < self.interval_ticks {
            return;
        }
        self.counter = 0;

        let solution = session.problem().solution;
        let answer = if self.rng.random_bool(self.accuracy) {
            solution
        } else {
            solution + self.rng.random_range(1..10)
        };

        for action in actions_for_text(&format!("{answer}\n")) {
            session.handle_action(action);
        }
    }
}
