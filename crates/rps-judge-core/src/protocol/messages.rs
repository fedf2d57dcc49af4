//! Round context and decision record, the two documents exchanged with a judge.

use crate::games::MoveCategory;
use crate::protocol::{RoundAction, RoundWinner, ValidationStatus};
use crate::session::ResourceState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a decision record from a judge
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Malformed decision JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Inconsistent decision record: {0}")]
    Inconsistent(String),
}

/// Snapshot handed to a judge for one round. Not retained after the round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundContext {
    pub round_number: u32,
    pub player1_move: Option<MoveCategory>,
    #[serde(rename = "player2_move")]
    pub player2_raw_input: String,
    #[serde(flatten)]
    pub resources: ResourceState,
}

impl RoundContext {
    pub fn new(
        round_number: u32,
        player1_move: Option<MoveCategory>,
        player2_raw_input: impl Into<String>,
        resources: ResourceState,
    ) -> Self {
        Self {
            round_number,
            player1_move,
            player2_raw_input: player2_raw_input.into(),
            resources,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntentUnderstanding {
    pub move_understood: Option<MoveCategory>,
    pub reasoning: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Validation {
    pub status: ValidationStatus,
    pub reason: String,
}

impl Validation {
    pub fn new(status: ValidationStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }
}

/// Outcome of an accepted round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameLogic {
    pub player1_move: Option<MoveCategory>,
    pub player2_move: Option<MoveCategory>,
    pub round_winner: Option<RoundWinner>,
    pub round_explanation: String,
}

/// Bombs left per player. Kept as integers, written as digit strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BombsRemaining {
    #[serde(with = "counter_serde")]
    pub player1: u8,
    #[serde(with = "counter_serde")]
    pub player2: u8,
}

impl BombsRemaining {
    pub fn from_resources(resources: &ResourceState) -> Self {
        Self {
            player1: u8::from(!resources.player1_bomb_used),
            player2: u8::from(!resources.player2_bomb_used),
        }
    }
}

mod counter_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(count: &u8, s: S) -> Result<S::Ok, S::Error> {
        count.to_string().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
        let text = String::deserialize(d)?;
        match text.as_str() {
            "0" => Ok(0),
            "1" => Ok(1),
            other => Err(serde::de::Error::custom(format!(
                "expected \"0\" or \"1\", got {other:?}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateUpdate {
    pub player1_bomb_used: bool,
    pub player2_bomb_used: bool,
    pub bombs_remaining: BombsRemaining,
}

impl StateUpdate {
    pub fn from_resources(resources: &ResourceState) -> Self {
        Self {
            player1_bomb_used: resources.player1_bomb_used,
            player2_bomb_used: resources.player2_bomb_used,
            bombs_remaining: BombsRemaining::from_resources(resources),
        }
    }

    pub fn resources(&self) -> ResourceState {
        ResourceState {
            player1_bomb_used: self.player1_bomb_used,
            player2_bomb_used: self.player2_bomb_used,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinalResult {
    pub move_accepted: bool,
    pub action: RoundAction,
    pub player_message: String,
}

/// Structured verdict for one round. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionRecord {
    pub round_number: u32,
    pub player2_raw_input: String,
    pub intent_understanding: IntentUnderstanding,
    pub validation: Validation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_logic: Option<GameLogic>,
    pub state_update: StateUpdate,
    pub final_result: FinalResult,
}

impl DecisionRecord {
    /// Parse a record from JSON text and reject structurally or
    /// logically inconsistent documents.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let record: DecisionRecord = serde_json::from_str(text)?;
        record.check_consistency()?;
        Ok(record)
    }

    pub fn status(&self) -> ValidationStatus {
        self.validation.status
    }

    pub fn is_accepted(&self) -> bool {
        self.final_result.move_accepted
    }

    /// Winner of the round, if it was played and decided
    pub fn round_winner(&self) -> Option<RoundWinner> {
        if !self.validation.status.is_valid() {
            return None;
        }
        self.game_logic.as_ref().and_then(|logic| logic.round_winner)
    }

    /// Cross-field rules the schema alone cannot express
    pub fn check_consistency(&self) -> Result<(), SchemaError> {
        let status = self.validation.status;

        if self.final_result.move_accepted != status.is_valid() {
            return Err(SchemaError::Inconsistent(format!(
                "move_accepted={} contradicts status {}",
                self.final_result.move_accepted, status
            )));
        }

        if self.final_result.action != status.action() {
            return Err(SchemaError::Inconsistent(format!(
                "action {} contradicts status {}",
                self.final_result.action, status
            )));
        }

        if status.is_valid() && self.game_logic.is_none() {
            return Err(SchemaError::Inconsistent(
                "VALID round is missing game_logic".to_string(),
            ));
        }

        let expected = BombsRemaining::from_resources(&self.state_update.resources());
        if self.state_update.bombs_remaining != expected {
            return Err(SchemaError::Inconsistent(
                "bombs_remaining disagrees with bomb_used flags".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RECORD: &str = r#"{
        "round_number": 2,
        "player2_raw_input": "rock!",
        "intent_understanding": {"move_understood": "rock", "reasoning": "said rock"},
        "validation": {"status": "VALID", "reason": "ok"},
        "game_logic": {
            "player1_move": "scissors",
            "player2_move": "rock",
            "round_winner": "player2",
            "round_explanation": "rock beats scissors."
        },
        "state_update": {
            "player1_bomb_used": false,
            "player2_bomb_used": true,
            "bombs_remaining": {"player1": "1", "player2": "0"}
        },
        "final_result": {"move_accepted": true, "action": "PLAYED", "player_message": "Nice."}
    }"#;

    #[test]
    fn test_parse_valid_record() {
        let record = DecisionRecord::from_json(VALID_RECORD).unwrap();
        assert_eq!(record.round_number, 2);
        assert_eq!(record.round_winner(), Some(RoundWinner::Player2));
        assert_eq!(record.state_update.bombs_remaining.player1, 1);
        assert_eq!(record.state_update.bombs_remaining.player2, 0);
        assert!(record.is_accepted());
    }

    #[test]
    fn test_bombs_remaining_written_as_strings() {
        let record = DecisionRecord::from_json(VALID_RECORD).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["state_update"]["bombs_remaining"]["player1"], "1");
        assert_eq!(value["state_update"]["bombs_remaining"]["player2"], "0");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let text = VALID_RECORD.replace("\"round_number\": 2,", "\"round_number\": 2, \"mood\": \"happy\",");
        assert!(matches!(
            DecisionRecord::from_json(&text),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn test_numeric_counter_rejected() {
        let text = VALID_RECORD.replace("\"player1\": \"1\"", "\"player1\": 1");
        assert!(matches!(
            DecisionRecord::from_json(&text),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn test_accepted_flag_must_match_status() {
        let text = VALID_RECORD.replace("\"move_accepted\": true", "\"move_accepted\": false");
        assert!(matches!(
            DecisionRecord::from_json(&text),
            Err(SchemaError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_action_must_match_status() {
        let text = VALID_RECORD.replace("\"PLAYED\"", "\"REJECTED\"");
        assert!(matches!(
            DecisionRecord::from_json(&text),
            Err(SchemaError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_counters_must_match_flags() {
        let text = VALID_RECORD.replace("\"player2\": \"0\"", "\"player2\": \"1\"");
        assert!(matches!(
            DecisionRecord::from_json(&text),
            Err(SchemaError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_unclear_record_without_game_logic() {
        let text = r#"{
            "round_number": 1,
            "player2_raw_input": "hmm",
            "intent_understanding": {"move_understood": null, "reasoning": "nothing"},
            "validation": {"status": "UNCLEAR", "reason": "Could not determine move from input."},
            "state_update": {
                "player1_bomb_used": false,
                "player2_bomb_used": false,
                "bombs_remaining": {"player1": "1", "player2": "1"}
            },
            "final_result": {"move_accepted": false, "action": "UNCLEAR_MOVE", "player_message": "?"}
        }"#;
        let record = DecisionRecord::from_json(text).unwrap();
        assert_eq!(record.status(), ValidationStatus::Unclear);
        assert_eq!(record.round_winner(), None);
    }

    #[test]
    fn test_rejected_round_has_no_winner() {
        let text = VALID_RECORD
            .replace("\"VALID\"", "\"INVALID\"")
            .replace("\"move_accepted\": true", "\"move_accepted\": false")
            .replace("\"PLAYED\"", "\"REJECTED\"");
        let record = DecisionRecord::from_json(&text).unwrap();
        assert!(record.game_logic.is_some());
        assert_eq!(record.round_winner(), None);
    }

    #[test]
    fn test_round_context_wire_form() {
        let ctx = RoundContext::new(
            3,
            Some(MoveCategory::Bomb),
            "paper please",
            ResourceState {
                player1_bomb_used: false,
                player2_bomb_used: true,
            },
        );
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["round_number"], 3);
        assert_eq!(value["player1_move"], "bomb");
        assert_eq!(value["player2_move"], "paper please");
        assert_eq!(value["player1_bomb_used"], false);
        assert_eq!(value["player2_bomb_used"], true);
    }
}
