//! Per-match game state.

use crate::games::MoveCategory;
use crate::protocol::{DecisionRecord, MatchId, ValidationStatus};
use serde::{Deserialize, Serialize};

/// Bomb availability for one match. A flag never goes back to `false`
/// within a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub player1_bomb_used: bool,
    pub player2_bomb_used: bool,
}

impl ResourceState {
    /// Resource state after a round with the given verdict.
    ///
    /// Nothing is consumed unless the round is `VALID`.
    pub fn after_round(
        &self,
        status: ValidationStatus,
        player1_move: Option<MoveCategory>,
        player2_move: Option<MoveCategory>,
    ) -> ResourceState {
        if !status.is_valid() {
            return *self;
        }

        ResourceState {
            player1_bomb_used: self.player1_bomb_used
                || player1_move.is_some_and(|m| m.is_bomb()),
            player2_bomb_used: self.player2_bomb_used
                || player2_move.is_some_and(|m| m.is_bomb()),
        }
    }

    /// Fold another state in without clearing any spent flag
    pub fn merge(&self, other: &ResourceState) -> ResourceState {
        ResourceState {
            player1_bomb_used: self.player1_bomb_used || other.player1_bomb_used,
            player2_bomb_used: self.player2_bomb_used || other.player2_bomb_used,
        }
    }
}

/// Authoritative state of the match in progress, owned by the caller
#[derive(Clone, Debug)]
pub struct GameState {
    pub match_id: MatchId,
    /// 1-based number of the next round
    pub round_number: u32,
    pub resources: ResourceState,
    pub history: Vec<DecisionRecord>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            match_id: MatchId::new(),
            round_number: 1,
            resources: ResourceState::default(),
            history: Vec::new(),
        }
    }

    /// Apply a finished round: commit its state delta if the move was
    /// accepted, record it and advance the round counter.
    pub fn commit(&mut self, record: DecisionRecord) {
        if record.is_accepted() {
            self.resources = self.resources.merge(&record.state_update.resources());
        }
        self.history.push(record);
        self.round_number += 1;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
