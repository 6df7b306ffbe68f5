// Per-client battle session
//
// Owns both player states, the round state machine and the peer link, and
// applies everything on the tick thread: local input, incoming messages and
// due timers. The opponent state is a mirror that only our own attacks and
// the peer's messages ever change.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bars::GaugeBars;
use super::events::BattleEvent;
use super::gauge::{AnswerEffect, GaugeEngine};
use super::player::PlayerBattleState;
use super::protocol::{PeerLink, PeerMessage};
use super::round::{RecordedResult, RoundPhase, RoundStateMachine, RoundStep};
use super::score::{MatchScore, MatchVerdict, ResultText, RoundOutcome, Side};
use crate::core::BattleConfig;
use crate::engine::input::{Action, AnswerBuffer};
use crate::engine::net::Transport;
use crate::game::characters::{roster, Character, CharacterError, Difficulty, Problem, ProblemSource};

/// Everything a session needs from the outside at creation
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub config: BattleConfig,
    /// Selected character, by roster name
    pub character_name: String,
    /// Seed for problem generation
    pub seed: u64,
}

/// Result of submitting the typed answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerJudgement {
    Correct(AnswerEffect),
    Incorrect,
    /// Not accepting answers right now
    Ignored,
}

/// One client's side of a match
pub struct BattleSession {
    config: BattleConfig,
    engine: GaugeEngine,
    link: PeerLink,
    rng: Pcg32,

    own_character: Character,
    opponent_character: Option<Character>,
    own: PlayerBattleState,
    opponent: PlayerBattleState,
    bars: GaugeBars,

    answer: AnswerBuffer,
    difficulty: Difficulty,
    problem: Problem,

    round: RoundStateMachine,
    events: Vec<BattleEvent>,
    verdict: Option<MatchVerdict>,
    left: bool,
}

impl BattleSession {
    /// Create a session for the selected character
    pub fn new(context: SessionContext, transport: Box<dyn Transport>) -> Result<Self, CharacterError> {
        let own_character = roster::lookup(&context.character_name)?;
        let mut rng = Pcg32::seed_from_u64(context.seed);
        let difficulty = Difficulty::default();
        let problem = own_character.generate_problem(difficulty, &mut rng);

        let own = PlayerBattleState::new(own_character.max_health());
        // Placeholder until the opponent's identity arrives
        let opponent = PlayerBattleState::new(own_character.max_health());
        let bars = GaugeBars::at_rest(&own, &opponent);

        Ok(Self {
            engine: GaugeEngine::from_config(&context.config),
            round: RoundStateMachine::new(&context.config),
            answer: AnswerBuffer::new(context.config.max_answer_digits),
            config: context.config,
            link: PeerLink::new(transport),
            rng,
            own_character,
            opponent_character: None,
            own,
            opponent,
            bars,
            difficulty,
            problem,
            events: Vec::new(),
            verdict: None,
            left: false,
        })
    }

    /// Announce our character to the peer and show the first problem
    pub fn start(&mut self) {
        info!("Session started as {}", self.own_character.name);
        self.send(PeerMessage::AssignOpponentIdentity {
            character_name: self.own_character.name.to_string(),
        });
        self.emit(BattleEvent::ProblemChanged {
            prompt: self.problem.prompt.clone(),
        });
        self.emit(BattleEvent::AnswerChanged {
            text: self.answer.text().to_string(),
        });
    }

    // === Accessors ===

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn round_number(&self) -> u32 {
        self.round.round()
    }

    pub fn score(&self) -> MatchScore {
        self.round.score()
    }

    pub fn result_text(&self) -> Option<ResultText> {
        self.round.result_text()
    }

    pub fn verdict(&self) -> Option<MatchVerdict> {
        self.verdict
    }

    pub fn own(&self) -> &PlayerBattleState {
        &self.own
    }

    pub fn opponent(&self) -> &PlayerBattleState {
        &self.opponent
    }

    pub fn own_character(&self) -> &Character {
        &self.own_character
    }

    pub fn opponent_character(&self) -> Option<&Character> {
        self.opponent_character.as_ref()
    }

    pub fn bars(&self) -> &GaugeBars {
        &self.bars
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn answer_text(&self) -> &str {
        self.answer.text()
    }

    pub fn has_left(&self) -> bool {
        self.left
    }

    pub fn messages_sent(&self) -> u64 {
        self.link.sent_count()
    }

    pub fn messages_received(&self) -> u64 {
        self.link.received_count()
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    // === Local input ===

    /// Apply a keypad action
    pub fn handle_action(&mut self, action: Action) {
        if self.left {
            return;
        }
        match action {
            Action::Digit(digit) => {
                if self.answer.push_digit(digit) {
                    self.emit_answer();
                }
            }
            Action::Backspace => {
                if self.answer.backspace() {
                    self.emit_answer();
                }
            }
            Action::Submit => {
                self.submit_answer();
            }
            Action::SelectDifficulty(difficulty) => self.change_difficulty(difficulty),
            Action::UseSpecial => {
                self.use_special();
            }
        }
    }

    /// Judge the typed answer against the current problem
    pub fn submit_answer(&mut self) -> AnswerJudgement {
        if self.left || !self.round.phase().accepts_input() {
            return AnswerJudgement::Ignored;
        }

        let answer = self.answer.take();
        self.emit_answer();

        if !self.problem.is_solved_by(answer) {
            debug!("Wrong answer {:?} for {}", answer, self.problem.prompt);
            // Local only; a wrong answer never crosses the wire
            if self.own.combo.reset() {
                self.emit(BattleEvent::ComboChanged { combo: 0 });
            }
            return AnswerJudgement::Incorrect;
        }

        self.new_problem();

        let combo = self
            .own
            .combo
            .on_correct_answer(self.own_character.combo_duration());
        self.emit(BattleEvent::ComboChanged { combo });

        let effect = self
            .engine
            .apply_correct_answer(&self.own_character, self.difficulty, combo);

        if self.own.special.add(effect.special_gain) {
            self.emit(BattleEvent::SpecialReady);
        }
        self.opponent.take_damage(effect.damage);
        self.opponent.special.add(effect.opponent_special_gain);
        self.emit(BattleEvent::GaugesChanged);

        let own_special = self.own.special.value();
        let opponent_health = self.opponent.display_health();
        let opponent_special = self.opponent.special.value();
        self.send(PeerMessage::SetOpponentSpecialGauge { value: own_special });
        self.send(PeerMessage::SetOwnHealthFromPeer {
            value: opponent_health,
        });
        self.send(PeerMessage::SetOwnSpecialFromPeer {
            value: opponent_special,
        });

        debug!(
            "Hit for {:.1} (combo {}), opponent at {:.1}",
            effect.damage, combo, self.opponent.health
        );

        if self.opponent.is_knocked_out() && self.round.knockout_detected() {
            self.emit(BattleEvent::Knockout {
                loser: Side::Opponent,
            });
        }

        AnswerJudgement::Correct(effect)
    }

    /// Switch difficulty tier during an active round; the current problem
    /// is replaced
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        if self.left || self.difficulty == difficulty || !self.round.phase().accepts_input() {
            return;
        }
        debug!("Difficulty -> {}", difficulty.as_str());
        self.difficulty = difficulty;
        self.new_problem();
    }

    /// Fire the special move if the gauge is full
    pub fn use_special(&mut self) -> bool {
        if self.left || !self.round.phase().accepts_input() || !self.own.special.is_full() {
            return false;
        }

        self.own.special.drain();
        self.emit(BattleEvent::SpecialSpent);
        self.emit(BattleEvent::GaugesChanged);
        self.send(PeerMessage::SetOpponentSpecialGauge { value: 0.0 });
        self.send(PeerMessage::TriggerOpponentSpecialMove);
        info!("{} used special", self.own_character.name);
        true
    }

    // === Tick ===

    /// Advance one tick: apply arrived messages, timers and bar animation
    pub fn tick(&mut self, dt: f32) {
        if self.left {
            return;
        }

        self.pump_messages();
        if self.left {
            return;
        }

        if self.own.combo.tick(dt) {
            self.emit(BattleEvent::ComboChanged { combo: 0 });
        }

        self.bars.step(&self.own, &self.opponent, &self.config);

        for step in self.round.advance(dt) {
            self.apply_round_step(step);
            if self.left {
                break;
            }
        }
    }

    fn pump_messages(&mut self) {
        loop {
            match self.link.poll() {
                Ok(Some(message)) => {
                    self.handle_message(message);
                    if self.left {
                        return;
                    }
                }
                Ok(None) => return,
                Err(e) if e.is_terminal() => {
                    self.on_peer_disconnected();
                    return;
                }
                Err(e) => warn!("Rejected peer message: {}", e),
            }
        }
    }

    // === Peer messages ===

    /// Apply one peer message
    pub fn handle_message(&mut self, message: PeerMessage) {
        if self.left {
            return;
        }
        if let Err(e) = message.validate() {
            warn!("Rejected peer message: {}", e);
            return;
        }

        match message {
            PeerMessage::AssignOpponentIdentity { character_name } => {
                self.on_opponent_identity(&character_name)
            }
            PeerMessage::SetOpponentSpecialGauge { value } => self.on_opponent_special(value),
            PeerMessage::SetOwnHealthFromPeer { value } => self.on_own_health(value),
            PeerMessage::SetOwnSpecialFromPeer { value } => self.on_own_special(value),
            PeerMessage::ReportRoundResult { outcome, round } => {
                self.on_round_result(outcome, round)
            }
            PeerMessage::TriggerOpponentSpecialMove => self.on_opponent_special_move(),
        }
    }

    fn on_opponent_identity(&mut self, name: &str) {
        if let Some(existing) = &self.opponent_character {
            debug!(
                "Ignoring identity {} (opponent already {})",
                name, existing.name
            );
            return;
        }

        let character = match roster::lookup(name) {
            Ok(character) => character,
            Err(e) => {
                let known: Vec<_> = roster::names().collect();
                warn!("Cannot play against peer: {} (known: {})", e, known.join(", "));
                self.leave();
                return;
            }
        };

        info!("Opponent is {}", character.name);
        self.opponent = PlayerBattleState::new(character.max_health());
        self.bars.opponent_health = self.opponent.display_health();
        self.bars.opponent_special = 0.0;
        self.opponent_character = Some(character);

        self.emit(BattleEvent::OpponentJoined {
            character: character.name.to_string(),
        });
        self.emit(BattleEvent::GaugesChanged);
        self.begin_setup();
    }

    fn on_opponent_special(&mut self, value: f32) {
        if !self.round.phase().accepts_gauge_updates() {
            debug!("Ignoring opponent special {} after match end", value);
            return;
        }
        self.opponent.special.set(value);
        self.emit(BattleEvent::GaugesChanged);
    }

    fn on_own_health(&mut self, value: f32) {
        if !self.round.phase().accepts_gauge_updates() {
            debug!("Ignoring own health {} after match end", value);
            return;
        }
        self.own.health = value.min(self.own.max_health);
        self.emit(BattleEvent::GaugesChanged);

        if self.own.is_knocked_out() && !self.round.loss_recorded(Side::Own) {
            self.on_own_knockout();
        }
    }

    fn on_own_special(&mut self, value: f32) {
        if !self.round.phase().accepts_gauge_updates() {
            debug!("Ignoring own special {} after match end", value);
            return;
        }
        if self.own.special.set(value) {
            self.emit(BattleEvent::SpecialReady);
        }
        self.emit(BattleEvent::GaugesChanged);
    }

    fn on_own_knockout(&mut self) {
        self.round.knockout_detected();
        self.emit(BattleEvent::Knockout { loser: Side::Own });

        let winner_ratio = self.opponent.health_ratio();
        if let Some(recorded) = self.round.record_loss(Side::Own, winner_ratio) {
            self.announce_result(recorded);
            let round = self.round.round();
            self.send(PeerMessage::ReportRoundResult {
                outcome: RoundOutcome::Lose,
                round,
            });
        }
    }

    fn on_round_result(&mut self, outcome: RoundOutcome, round: u32) {
        if round != self.round.round() {
            debug!(
                "Ignoring {:?} for round {} (now round {})",
                outcome,
                round,
                self.round.round()
            );
            return;
        }

        // The reporter's outcome says who lost
        let (loser, winner_ratio) = match outcome {
            RoundOutcome::Lose => (Side::Opponent, self.own.health_ratio()),
            RoundOutcome::Win => (Side::Own, self.opponent.health_ratio()),
        };

        if self.round.knockout_detected() {
            self.emit(BattleEvent::Knockout { loser });
        }

        match self.round.record_loss(loser, winner_ratio) {
            Some(recorded) => {
                self.announce_result(recorded);
                if outcome == RoundOutcome::Lose {
                    // Confirm the win back to the reporter
                    self.send(PeerMessage::ReportRoundResult {
                        outcome: outcome.flipped(),
                        round,
                    });
                }
            }
            None => debug!("Result {:?} for round {} already recorded", outcome, round),
        }
    }

    fn on_opponent_special_move(&mut self) {
        if self.phase() == RoundPhase::MatchOver {
            return;
        }
        let name = self
            .opponent_character
            .map(|c| c.name)
            .unwrap_or("opponent");
        info!("{} used special", name);
        self.emit(BattleEvent::OpponentSpecialMove);
    }

    /// The transport reported the peer gone; leave immediately
    pub fn on_peer_disconnected(&mut self) {
        if self.left {
            return;
        }
        info!("Peer disconnected, leaving session");
        self.leave();
    }

    // === Round lifecycle ===

    fn begin_setup(&mut self) {
        self.round.begin_setup();
        self.emit(BattleEvent::CountdownShown {
            round: self.round.round(),
            seconds: self.config.countdown_secs,
        });
    }

    fn announce_result(&mut self, recorded: RecordedResult) {
        debug!(
            "{:?} loss recorded for round {}{}",
            recorded.loser,
            self.round.round(),
            if recorded.restarted_transition {
                " (transition restarted)"
            } else {
                ""
            }
        );
        self.emit(BattleEvent::ResultTextChanged {
            text: recorded.text,
        });
        if recorded.text != ResultText::DoubleKnockout {
            self.emit(BattleEvent::ResultPanelShown {
                score: self.round.score(),
            });
        }
    }

    fn apply_round_step(&mut self, step: RoundStep) {
        match step {
            RoundStep::RoundStarted { round } => {
                self.emit(BattleEvent::RoundStarted { round });
            }
            RoundStep::NextRound { round } => {
                info!("Preparing round {}", round);
                self.emit(BattleEvent::ResultPanelHidden);
                self.reset_round();
                self.begin_setup();
            }
            RoundStep::MatchOver => {
                self.emit(BattleEvent::ResultPanelHidden);
                self.emit(BattleEvent::MatchOver {
                    score: self.round.score(),
                });
            }
            RoundStep::MatchDecided { verdict } => {
                self.verdict = Some(verdict);
                self.emit(BattleEvent::MatchDecided { verdict });
                self.leave();
            }
        }
    }

    fn reset_round(&mut self) {
        self.own.reset_for_round();
        self.opponent.reset_for_round();
        self.answer.clear();
        self.emit_answer();
        self.emit(BattleEvent::ComboChanged { combo: 0 });
        self.new_problem();
        self.emit(BattleEvent::GaugesChanged);
    }

    fn leave(&mut self) {
        if self.left {
            return;
        }
        self.left = true;
        self.round.cancel_all();
        self.emit(BattleEvent::LeaveSession);
        info!("Left session ({})", self.round.score());
    }

    // === Helpers ===

    fn new_problem(&mut self) {
        self.problem = self
            .own_character
            .generate_problem(self.difficulty, &mut self.rng);
        self.emit(BattleEvent::ProblemChanged {
            prompt: self.problem.prompt.clone(),
        });
    }

    fn send(&mut self, message: PeerMessage) {
        if self.left {
            return;
        }
        match self.link.send(&message) {
            Ok(()) => {}
            Err(e) if e.is_terminal() => self.on_peer_disconnected(),
            // Best effort only: nothing is retried
            Err(e) => warn!("Failed to send {}: {}", message.kind().as_str(), e),
        }
    }

    fn emit_answer(&mut self) {
        self.emit(BattleEvent::AnswerChanged {
            text: self.answer.text().to_string(),
        });
    }

    fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}
