// Battle system
//
// Everything that happens once two clients are paired:
// - Gauge math (damage, special gains) and the combo streak
// - Per-player state and the animated display bars
// - The round state machine and match score
// - The peer protocol carried over a `Transport`
// - `BattleSession`, which ties it together on the tick thread

pub mod bars;
pub mod bot;
pub mod combo;
pub mod events;
pub mod gauge;
pub mod player;
pub mod protocol;
pub mod round;
pub mod score;
pub mod session;

// Re-export commonly used types
#[allow(unused_imports)]
pub use {
    bot::AnswerBot,
    events::BattleEvent,
    protocol::{PeerLink, PeerMessage},
    round::RoundPhase,
    score::{MatchScore, MatchVerdict, ResultText, RoundOutcome, Side},
    session::{AnswerJudgement, BattleSession, SessionContext},
};
