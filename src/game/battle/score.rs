// Match score, round outcomes and result labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Round outcome from the point of view of the peer reporting it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoundOutcome {
    Win,
    Lose,
}

impl RoundOutcome {
    /// The same fact seen from the other peer
    pub fn flipped(self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
        }
    }
}

/// Which side of the local client a fact is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Own,
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Own => Self::Opponent,
            Self::Opponent => Self::Own,
        }
    }
}

/// Round wins on each side; only ever grows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub own_wins: u32,
    pub opponent_wins: u32,
}

impl MatchScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a round win
    pub fn award(&mut self, winner: Side) {
        match winner {
            Side::Own => self.own_wins += 1,
            Side::Opponent => self.opponent_wins += 1,
        }
    }

    /// Check if either side has enough wins
    pub fn is_decided(&self, wins_needed: u32) -> bool {
        self.own_wins >= wins_needed || self.opponent_wins >= wins_needed
    }

    /// Final verdict, `None` while the match is still running
    pub fn verdict(&self, wins_needed: u32) -> Option<MatchVerdict> {
        let own = self.own_wins >= wins_needed;
        let opponent = self.opponent_wins >= wins_needed;
        match (own, opponent) {
            (true, true) => Some(MatchVerdict::Draw),
            (true, false) => Some(MatchVerdict::Win),
            (false, true) => Some(MatchVerdict::Lose),
            (false, false) => None,
        }
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.own_wins, self.opponent_wins)
    }
}

/// Match result for the local player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVerdict {
    Win,
    Lose,
    /// Both sides reached the win count in the same double-knockout round
    Draw,
}

impl MatchVerdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Lose => "LOSE",
            Self::Draw => "DRAW",
        }
    }
}

/// Round result banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultText {
    Perfect,
    Knockout,
    Close,
    DoubleKnockout,
}

impl ResultText {
    /// Pick the banner from the winner's residual health ratio
    pub fn for_ratio(ratio: f32, perfect_ratio: f32, close_ratio: f32) -> Self {
        if ratio > perfect_ratio {
            Self::Perfect
        } else if ratio < close_ratio {
            Self::Close
        } else {
            Self::Knockout
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "PERFECT",
            Self::Knockout => "KNOCKOUT",
            Self::Close => "CLOSE",
            Self::DoubleKnockout => "DOUBLE KNOCKOUT",
        }
    }
}

impl fmt::Display for ResultText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_text_thresholds() {
        assert_eq!(ResultText::for_ratio(1.0, 0.99, 0.10), ResultText::Perfect);
        assert_eq!(ResultText::for_ratio(0.99, 0.99, 0.10), ResultText::Knockout);
        assert_eq!(ResultText::for_ratio(0.5, 0.99, 0.10), ResultText::Knockout);
        assert_eq!(ResultText::for_ratio(0.10, 0.99, 0.10), ResultText::Knockout);
        assert_eq!(ResultText::for_ratio(0.05, 0.99, 0.10), ResultText::Close);
        assert_eq!(ResultText::DoubleKnockout.to_string(), "DOUBLE KNOCKOUT");
    }

    #[test]
    fn test_verdicts() {
        let mut score = MatchScore::new();
        assert_eq!(score.verdict(3), None);

        for _ in 0..3 {
            score.award(Side::Own);
        }
        score.award(Side::Opponent);
        assert!(score.is_decided(3));
        assert_eq!(score.verdict(3), Some(MatchVerdict::Win));
        assert_eq!(score.to_string(), "3 - 1");

        score.opponent_wins = 3;
        assert_eq!(score.verdict(3), Some(MatchVerdict::Draw));

        let lost = MatchScore {
            own_wins: 0,
            opponent_wins: 3,
        };
        assert_eq!(lost.verdict(3), Some(MatchVerdict::Lose));
    }

    #[test]
    fn test_outcome_wire_names() {
        assert_eq!(serde_json::to_string(&RoundOutcome::Lose).unwrap(), "\"LOSE\"");
        assert_eq!(RoundOutcome::Win.flipped(), RoundOutcome::Lose);
        assert_eq!(Side::Own.other(), Side::Opponent);
    }
}
