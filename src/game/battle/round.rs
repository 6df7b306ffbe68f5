// Round/match lifecycle and result arbitration

use super::score::{MatchScore, MatchVerdict, ResultText, Side};
use crate::core::BattleConfig;
use crate::engine::scheduler::Scheduler;

/// Where the local client is in the round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    /// Waiting for the opponent's identity, or counting down to the round
    Setup,
    /// Answers are accepted
    Active,
    /// A knockout was seen; waiting for the result to be recorded
    AwaitingResult,
    /// Result is shown; next round or match end follows after a delay
    RoundTransition,
    /// Match decided; the verdict follows after a delay
    MatchOver,
}

impl RoundPhase {
    /// Whether answers and special moves are accepted
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether gauge/health messages from the peer still apply
    pub fn accepts_gauge_updates(&self) -> bool {
        !matches!(self, Self::MatchOver)
    }
}

/// Delayed lifecycle steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundTimer {
    Countdown,
    RoundTransition,
    MatchEnd,
}

/// A lifecycle step the session has to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStep {
    /// Countdown finished; the round is live
    RoundStarted { round: u32 },
    /// Result announcement finished and the match goes on; reset state and
    /// set up `round`
    NextRound { round: u32 },
    /// Result announcement finished and the match is decided
    MatchOver,
    /// Verdict delay finished
    MatchDecided { verdict: MatchVerdict },
}

/// What recording a loss did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedResult {
    pub loser: Side,
    pub text: ResultText,
    /// A pending transition timer was cancelled and restarted
    pub restarted_transition: bool,
}

/// Round state machine, owner of the match score
#[derive(Debug)]
pub struct RoundStateMachine {
    phase: RoundPhase,
    round: u32,
    score: MatchScore,
    /// Per-round loss facts; cleared only at setup
    own_loss_recorded: bool,
    opponent_loss_recorded: bool,
    result_text: Option<ResultText>,
    timers: Scheduler<RoundTimer>,

    wins_needed: u32,
    countdown_secs: f32,
    announce_delay_secs: f32,
    match_over_delay_secs: f32,
    perfect_ratio: f32,
    close_ratio: f32,
}

impl RoundStateMachine {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            phase: RoundPhase::Setup,
            round: 1,
            score: MatchScore::new(),
            own_loss_recorded: false,
            opponent_loss_recorded: false,
            result_text: None,
            timers: Scheduler::new(),
            wins_needed: config.wins_needed,
            countdown_secs: config.countdown_secs,
            announce_delay_secs: config.announce_delay_secs,
            match_over_delay_secs: config.match_over_delay_secs,
            perfect_ratio: config.perfect_ratio,
            close_ratio: config.close_ratio,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Current round, numbered from 1
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn score(&self) -> MatchScore {
        self.score
    }

    pub fn result_text(&self) -> Option<ResultText> {
        self.result_text
    }

    /// Check if any result was recorded this round
    pub fn result_already_recorded(&self) -> bool {
        self.own_loss_recorded || self.opponent_loss_recorded
    }

    pub fn loss_recorded(&self, side: Side) -> bool {
        match side {
            Side::Own => self.own_loss_recorded,
            Side::Opponent => self.opponent_loss_recorded,
        }
    }

    #[cfg(test)]
    /// Seconds until the countdown ends, while one is running
    pub fn countdown_remaining(&self) -> Option<f32> {
        self.timers.remaining(RoundTimer::Countdown)
    }

    /// Enter setup for the current round and start its countdown
    pub fn begin_setup(&mut self) {
        self.phase = RoundPhase::Setup;
        self.own_loss_recorded = false;
        self.opponent_loss_recorded = false;
        self.result_text = None;
        self.timers.schedule(RoundTimer::Countdown, self.countdown_secs);
        log::info!("Round {} countdown ({}s)", self.round, self.countdown_secs);
    }

    /// A knockout was observed; stop accepting answers
    ///
    /// Returns true if this moved the machine into `AwaitingResult`.
    pub fn knockout_detected(&mut self) -> bool {
        match self.phase {
            RoundPhase::Setup | RoundPhase::Active => {
                self.timers.cancel(RoundTimer::Countdown);
                self.phase = RoundPhase::AwaitingResult;
                log::info!("Round {} knockout, awaiting result", self.round);
                true
            }
            _ => false,
        }
    }

    /// Record that `loser` was knocked out this round
    ///
    /// `winner_ratio` is the other side's residual health ratio, sampled
    /// before any reset. Each side's loss counts at most once per round;
    /// the second distinct loss in a round turns the banner into a double
    /// knockout. Returns `None` for a repeated fact or once the match is over.
    pub fn record_loss(&mut self, loser: Side, winner_ratio: f32) -> Option<RecordedResult> {
        if self.phase == RoundPhase::MatchOver || self.loss_recorded(loser) {
            return None;
        }

        let double = self.result_already_recorded();
        match loser {
            Side::Own => self.own_loss_recorded = true,
            Side::Opponent => self.opponent_loss_recorded = true,
        }
        self.score.award(loser.other());

        let text = if double {
            ResultText::DoubleKnockout
        } else {
            ResultText::for_ratio(winner_ratio, self.perfect_ratio, self.close_ratio)
        };
        self.result_text = Some(text);
        self.phase = RoundPhase::RoundTransition;
        self.timers.cancel(RoundTimer::Countdown);

        // Exactly one transition may be pending; restart it from now
        let restarted_transition = self
            .timers
            .schedule(RoundTimer::RoundTransition, self.announce_delay_secs);

        log::info!(
            "Round {}: {:?} lost, {} (score {})",
            self.round,
            loser,
            text,
            self.score
        );

        Some(RecordedResult {
            loser,
            text,
            restarted_transition,
        })
    }

    /// Advance timers and apply the lifecycle steps that came due
    pub fn advance(&mut self, dt: f32) -> Vec<RoundStep> {
        let mut steps = Vec::new();
        for timer in self.timers.advance(dt) {
            match timer {
                RoundTimer::Countdown => {
                    if self.phase == RoundPhase::Setup {
                        self.phase = RoundPhase::Active;
                        log::info!("Round {} started", self.round);
                        steps.push(RoundStep::RoundStarted { round: self.round });
                    }
                }
                RoundTimer::RoundTransition => {
                    if self.score.is_decided(self.wins_needed) {
                        self.phase = RoundPhase::MatchOver;
                        self.timers.clear();
                        self.timers
                            .schedule(RoundTimer::MatchEnd, self.match_over_delay_secs);
                        log::info!("Match over after round {} ({})", self.round, self.score);
                        steps.push(RoundStep::MatchOver);
                    } else {
                        self.round += 1;
                        steps.push(RoundStep::NextRound { round: self.round });
                    }
                }
                RoundTimer::MatchEnd => {
                    if let Some(verdict) = self.score.verdict(self.wins_needed) {
                        log::info!("Match verdict: {}", verdict.label());
                        steps.push(RoundStep::MatchDecided { verdict });
                    }
                }
            }
        }
        steps
    }

    /// Drop every pending timer (session teardown)
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> RoundStateMachine {
        let config = BattleConfig {
            countdown_secs: 1.0,
            announce_delay_secs: 2.0,
            match_over_delay_secs: 1.0,
            ..BattleConfig::default()
        };
        RoundStateMachine::new(&config)
    }

    fn active_machine() -> RoundStateMachine {
        let mut sm = machine();
        sm.begin_setup();
        assert_eq!(sm.advance(1.0), vec![RoundStep::RoundStarted { round: 1 }]);
        sm
    }

    #[test]
    fn test_countdown_to_active() {
        let mut sm = machine();
        assert_eq!(sm.phase(), RoundPhase::Setup);
        assert!(sm.advance(5.0).is_empty(), "no countdown before setup");

        sm.begin_setup();
        assert!(sm.advance(0.5).is_empty());
        assert_eq!(sm.countdown_remaining(), Some(0.5));
        assert_eq!(sm.advance(0.5), vec![RoundStep::RoundStarted { round: 1 }]);
        assert!(sm.phase().accepts_input());
    }

    #[test]
    fn test_single_knockout() {
        let mut sm = active_machine();
        assert!(sm.knockout_detected());
        assert_eq!(sm.phase(), RoundPhase::AwaitingResult);
        assert!(!sm.knockout_detected());

        let recorded = sm.record_loss(Side::Opponent, 1.0).unwrap();
        assert_eq!(recorded.text, ResultText::Perfect);
        assert!(!recorded.restarted_transition);
        assert_eq!(sm.score().own_wins, 1);
        assert_eq!(sm.phase(), RoundPhase::RoundTransition);

        assert!(sm.advance(1.5).is_empty());
        assert_eq!(sm.advance(0.5), vec![RoundStep::NextRound { round: 2 }]);
    }

    #[test]
    fn test_duplicate_fact_is_ignored() {
        let mut sm = active_machine();
        sm.record_loss(Side::Own, 0.5).unwrap();
        assert!(sm.record_loss(Side::Own, 0.5).is_none());
        assert_eq!(sm.score().opponent_wins, 1);
        assert_eq!(sm.result_text(), Some(ResultText::Knockout));
    }

    #[test]
    fn test_double_knockout() {
        let mut sm = active_machine();
        sm.record_loss(Side::Own, 0.0).unwrap();
        sm.advance(1.5);

        let second = sm.record_loss(Side::Opponent, 0.0).unwrap();
        assert_eq!(second.text, ResultText::DoubleKnockout);
        assert!(second.restarted_transition);
        assert_eq!(
            sm.score(),
            MatchScore {
                own_wins: 1,
                opponent_wins: 1
            }
        );

        // The restarted timer fires once, two seconds after the second result
        assert!(sm.advance(1.0).is_empty());
        assert_eq!(sm.advance(1.0), vec![RoundStep::NextRound { round: 2 }]);
        assert!(sm.advance(10.0).is_empty());
    }

    #[test]
    fn test_setup_clears_round_facts() {
        let mut sm = active_machine();
        sm.record_loss(Side::Own, 0.3).unwrap();
        sm.advance(2.0);
        sm.begin_setup();
        assert!(!sm.result_already_recorded());
        assert_eq!(sm.result_text(), None);
        assert!(sm.record_loss(Side::Own, 0.3).is_some());
        assert_eq!(sm.score().opponent_wins, 2);
    }

    #[test]
    fn test_match_over_with_win() {
        let mut sm = active_machine();
        for round in 1..=3 {
            sm.record_loss(Side::Opponent, 0.5).unwrap();
            let steps = sm.advance(2.0);
            if round < 3 {
                assert_eq!(steps, vec![RoundStep::NextRound { round: round + 1 }]);
                sm.begin_setup();
                sm.advance(1.0);
            } else {
                assert_eq!(steps, vec![RoundStep::MatchOver]);
            }
        }
        assert_eq!(sm.phase(), RoundPhase::MatchOver);
        assert_eq!(
            sm.advance(1.0),
            vec![RoundStep::MatchDecided {
                verdict: MatchVerdict::Win
            }]
        );
        assert!(sm.record_loss(Side::Own, 0.5).is_none());
    }

    #[test]
    fn test_double_knockout_draw() {
        let config = BattleConfig {
            wins_needed: 1,
            countdown_secs: 0.0,
            ..BattleConfig::default()
        };
        let mut sm = RoundStateMachine::new(&config);
        sm.begin_setup();
        sm.advance(0.0);
        sm.record_loss(Side::Own, 0.0).unwrap();
        sm.record_loss(Side::Opponent, 0.0).unwrap();
        assert_eq!(sm.advance(config.announce_delay_secs), vec![RoundStep::MatchOver]);
        assert_eq!(
            sm.advance(config.match_over_delay_secs),
            vec![RoundStep::MatchDecided {
                verdict: MatchVerdict::Draw
            }]
        );
    }
}
