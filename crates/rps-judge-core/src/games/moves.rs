//! Move categories.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four legal actions in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Rock,
    Paper,
    Scissors,
    Bomb,
}

/// Returned when a string is not a move name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move: {0}")]
pub struct ParseMoveError(pub String);

impl MoveCategory {
    /// All categories in intent priority order
    pub const ALL: [MoveCategory; 4] = [
        MoveCategory::Rock,
        MoveCategory::Paper,
        MoveCategory::Scissors,
        MoveCategory::Bomb,
    ];

    /// The three moves of the classic cycle
    pub const CLASSIC: [MoveCategory; 3] =
        [MoveCategory::Rock, MoveCategory::Paper, MoveCategory::Scissors];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveCategory::Rock => "rock",
            MoveCategory::Paper => "paper",
            MoveCategory::Scissors => "scissors",
            MoveCategory::Bomb => "bomb",
        }
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, MoveCategory::Bomb)
    }

    /// Check if this move beats the other under the classic cycle.
    ///
    /// Bomb is not part of the cycle; its dominance is handled by the rules.
    pub fn beats(&self, other: &MoveCategory) -> bool {
        matches!(
            (self, other),
            (MoveCategory::Rock, MoveCategory::Scissors)
                | (MoveCategory::Scissors, MoveCategory::Paper)
                | (MoveCategory::Paper, MoveCategory::Rock)
        )
    }

    /// Pick a random move, offering bomb only while it is unspent
    pub fn random(bomb_used: bool) -> Self {
        let mut rng = rand::thread_rng();
        let pool: &[MoveCategory] = if bomb_used {
            &Self::CLASSIC
        } else {
            &Self::ALL
        };
        *pool.choose(&mut rng).unwrap_or(&MoveCategory::Rock)
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MoveCategory {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(MoveCategory::Rock),
            "paper" => Ok(MoveCategory::Paper),
            "scissors" => Ok(MoveCategory::Scissors),
            "bomb" => Ok(MoveCategory::Bomb),
            other => Err(ParseMoveError(other.to_string())),
        }
    }
}
