//! Match session: runs rounds through a judge and owns the game state.

mod state;
mod tally;

pub use state::{GameState, ResourceState};
pub use tally::{MatchTally, MatchVerdict, MATCH_LENGTH};

use crate::games::MoveCategory;
use crate::judge::{Judge, JudgeError};
use crate::protocol::{DecisionRecord, MatchId, RoundContext};
use tracing::{info, info_span, warn, Instrument};

/// Result of a completed match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub tally: MatchTally,
}

/// Everything the caller needs after a round
#[derive(Clone, Debug)]
pub struct RoundReport {
    pub decision: DecisionRecord,
    /// Set when this round closed a match; state has already been reset
    pub match_summary: Option<MatchSummary>,
}

/// Sequential driver for rounds and matches
pub struct Session {
    judge: Judge,
    state: GameState,
}

impl Session {
    pub fn new(judge: Judge) -> Self {
        Self {
            judge,
            state: GameState::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn judge(&self) -> &Judge {
        &self.judge
    }

    /// Play one round. On any error the game state is left untouched.
    pub async fn play_round(
        &mut self,
        player2_raw_input: &str,
        player1_move: Option<MoveCategory>,
    ) -> Result<RoundReport, JudgeError> {
        if self.state.resources.player1_bomb_used && player1_move.is_some_and(|m| m.is_bomb()) {
            warn!(match_id = %self.state.match_id, "Rejected second bomb from player 1");
            return Err(JudgeError::Player1BombSpent);
        }

        let context = RoundContext::new(
            self.state.round_number,
            player1_move,
            player2_raw_input,
            self.state.resources,
        );

        let span = info_span!(
            "round",
            match_id = %self.state.match_id,
            round = context.round_number
        );
        let decision = self.judge.adjudicate(&context).instrument(span).await?;

        self.state.commit(decision.clone());

        let match_summary = MatchTally::for_completed_match(&self.state.history).map(|tally| {
            let summary = MatchSummary {
                match_id: self.state.match_id,
                tally,
            };
            info!(
                match_id = %summary.match_id,
                user_wins = tally.user_wins,
                bot_wins = tally.bot_wins,
                draws = tally.draws,
                verdict = %tally.verdict,
                "Match finished"
            );
            self.state = GameState::new();
            summary
        });

        Ok(RoundReport {
            decision,
            match_summary,
        })
    }
}
