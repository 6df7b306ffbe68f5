// Notifications for the presentation layer (UI, audio, scene flow)

use super::score::{MatchScore, MatchVerdict, ResultText, Side};

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    /// Opponent identity arrived; the blocking panel can go
    OpponentJoined { character: String },
    CountdownShown { round: u32, seconds: f32 },
    RoundStarted { round: u32 },
    ProblemChanged { prompt: String },
    AnswerChanged { text: String },
    ComboChanged { combo: u32 },
    /// Gauge targets moved; bars will animate toward them
    GaugesChanged,
    /// Own special gauge just became full
    SpecialReady,
    SpecialSpent,
    OpponentSpecialMove,
    Knockout { loser: Side },
    ResultTextChanged { text: ResultText },
    ResultPanelShown { score: MatchScore },
    ResultPanelHidden,
    MatchOver { score: MatchScore },
    MatchDecided { verdict: MatchVerdict },
    /// Leave the session (scene change, drop the connection)
    LeaveSession,
}
