//! Match aggregation over a fixed window of rounds.

use crate::protocol::{DecisionRecord, RoundWinner};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rounds per match
pub const MATCH_LENGTH: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    UserWins,
    BotWins,
    Draw,
}

impl MatchVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchVerdict::UserWins => "User wins",
            MatchVerdict::BotWins => "Bot wins",
            MatchVerdict::Draw => "Draw",
        }
    }
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Win counts for one match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTally {
    pub user_wins: u32,
    pub bot_wins: u32,
    pub draws: u32,
    pub verdict: MatchVerdict,
}

impl MatchTally {
    /// Count the rounds of a match. The user is player 2, the bot player 1;
    /// rejected, unclear and undecided rounds count as draws.
    pub fn from_rounds(rounds: &[DecisionRecord]) -> Self {
        let (mut user_wins, mut bot_wins, mut draws) = (0, 0, 0);

        for record in rounds {
            match record.round_winner() {
                Some(RoundWinner::Player2) => user_wins += 1,
                Some(RoundWinner::Player1) => bot_wins += 1,
                _ => draws += 1,
            }
        }

        let verdict = if user_wins > bot_wins {
            MatchVerdict::UserWins
        } else if bot_wins > user_wins {
            MatchVerdict::BotWins
        } else {
            MatchVerdict::Draw
        };

        Self {
            user_wins,
            bot_wins,
            draws,
            verdict,
        }
    }

    /// Tally the most recent match if `history` just completed one
    pub fn for_completed_match(history: &[DecisionRecord]) -> Option<Self> {
        if history.is_empty() || history.len() % MATCH_LENGTH != 0 {
            return None;
        }
        Some(Self::from_rounds(&history[history.len() - MATCH_LENGTH..]))
    }
}
