//! Rock-Paper-Scissors with a single-use bomb.

use super::traits::{GameRules, RoundOutcome};
use super::MoveCategory;
use crate::protocol::{RoundWinner, Validation, ValidationStatus};

const REASON_UNCLEAR: &str = "Could not determine move from input.";
const REASON_BOMB_SPENT: &str = "Bomb already used by player 2.";
const REASON_VALID: &str = "Move recognized and constraints satisfied.";

/// Rock-Paper-Scissors-Bomb rule set
pub struct RpsPlusRules;

impl GameRules for RpsPlusRules {
    fn validate(resolved: Option<MoveCategory>, bomb_used: bool) -> Validation {
        match resolved {
            None => Validation::new(ValidationStatus::Unclear, REASON_UNCLEAR),
            Some(MoveCategory::Bomb) if bomb_used => {
                Validation::new(ValidationStatus::Invalid, REASON_BOMB_SPENT)
            }
            Some(_) => Validation::new(ValidationStatus::Valid, REASON_VALID),
        }
    }

    fn judge(player1: MoveCategory, player2: MoveCategory) -> RoundOutcome {
        let (winner, explanation) = if player1 == player2 {
            (
                RoundWinner::Draw,
                format!("Both players played {player1}. It's a draw."),
            )
        } else if player1.is_bomb() {
            (
                RoundWinner::Player1,
                "Player1's bomb beats player2's move.".to_string(),
            )
        } else if player2.is_bomb() {
            (
                RoundWinner::Player2,
                "Player2's bomb beats player1's move.".to_string(),
            )
        } else if player1.beats(&player2) {
            (RoundWinner::Player1, format!("{player1} beats {player2}."))
        } else if player2.beats(&player1) {
            (RoundWinner::Player2, format!("{player2} beats {player1}."))
        } else {
            (
                RoundWinner::Draw,
                "No clear winner (unexpected input).".to_string(),
            )
        };

        RoundOutcome {
            winner,
            explanation,
        }
    }
}
