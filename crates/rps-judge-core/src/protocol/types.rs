//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique match identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Create a new random match ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Winner of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundWinner {
    Player1,
    Player2,
    Draw,
}

impl RoundWinner {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundWinner::Player1 => "player1",
            RoundWinner::Player2 => "player2",
            RoundWinner::Draw => "draw",
        }
    }
}

impl fmt::Display for RoundWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict of the move validator. Exactly one applies per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    Unclear,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "VALID",
            ValidationStatus::Invalid => "INVALID",
            ValidationStatus::Unclear => "UNCLEAR",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    /// The action a round with this status resolves to
    pub fn action(&self) -> RoundAction {
        match self {
            ValidationStatus::Valid => RoundAction::Played,
            ValidationStatus::Invalid => RoundAction::Rejected,
            ValidationStatus::Unclear => RoundAction::UnclearMove,
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened to the submitted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundAction {
    Played,
    Rejected,
    UnclearMove,
}

impl RoundAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundAction::Played => "PLAYED",
            RoundAction::Rejected => "REJECTED",
            RoundAction::UnclearMove => "UNCLEAR_MOVE",
        }
    }
}

impl fmt::Display for RoundAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_generation() {
        let id1 = MatchId::new();
        let id2 = MatchId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_status_to_action() {
        assert_eq!(ValidationStatus::Valid.action(), RoundAction::Played);
        assert_eq!(ValidationStatus::Invalid.action(), RoundAction::Rejected);
        assert_eq!(ValidationStatus::Unclear.action(), RoundAction::UnclearMove);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&RoundAction::UnclearMove).unwrap(),
            "\"UNCLEAR_MOVE\""
        );
        assert_eq!(
            serde_json::to_string(&ValidationStatus::Invalid).unwrap(),
            "\"INVALID\""
        );
        assert_eq!(
            serde_json::to_string(&RoundWinner::Player2).unwrap(),
            "\"player2\""
        );
    }
}
