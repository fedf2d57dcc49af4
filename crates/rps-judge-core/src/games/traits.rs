//! Game rule traits.

use super::MoveCategory;
use crate::protocol::{RoundWinner, Validation};

/// Outcome of two moves meeting
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub winner: RoundWinner,
    pub explanation: String,
}

/// Trait for game logic - a rule set implements this
pub trait GameRules {
    /// Check whether a resolved move may be played given the mover's bomb state
    fn validate(resolved: Option<MoveCategory>, bomb_used: bool) -> Validation;

    /// Determine the winner of two legal moves
    fn judge(player1: MoveCategory, player2: MoveCategory) -> RoundOutcome;
}
