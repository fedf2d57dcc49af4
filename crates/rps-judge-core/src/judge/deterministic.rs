//! Local rule-based judge.
//!
//! Runs intent resolution, validation, outcome resolution and the state
//! update, then assembles the decision record. Its output has exactly the
//! schema an external judge must produce.

use super::traits::{JudgeBackend, JudgeError};
use crate::games::{
    GameRules, Intent, IntentResolver, KeywordIntentResolver, RoundOutcome, RpsPlusRules,
};
use crate::protocol::{
    DecisionRecord, FinalResult, GameLogic, IntentUnderstanding, RoundContext, StateUpdate,
    Validation,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Deterministic judge over a swappable intent resolver
#[derive(Clone)]
pub struct DeterministicBackend {
    resolver: Arc<dyn IntentResolver>,
}

impl DeterministicBackend {
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(KeywordIntentResolver))
    }

    pub fn with_resolver(resolver: Arc<dyn IntentResolver>) -> Self {
        Self { resolver }
    }

    /// Adjudicate a round synchronously
    pub fn decide(&self, context: &RoundContext) -> DecisionRecord {
        let intent = self.resolver.resolve(&context.player2_raw_input);
        let validation = RpsPlusRules::validate(
            intent.move_understood,
            context.resources.player2_bomb_used,
        );

        let outcome = match (context.player1_move, intent.move_understood) {
            (Some(p1), Some(p2)) if validation.status.is_valid() => {
                Some(RpsPlusRules::judge(p1, p2))
            }
            _ => None,
        };

        let resources = context.resources.after_round(
            validation.status,
            context.player1_move,
            intent.move_understood,
        );

        debug!(
            round = context.round_number,
            status = %validation.status,
            "Deterministic judge decided round"
        );

        assemble(context, intent, validation, outcome, StateUpdate::from_resources(&resources))
    }
}

impl Default for DeterministicBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JudgeBackend for DeterministicBackend {
    fn name(&self) -> &'static str {
        "deterministic"
    }

    async fn adjudicate(
        &self,
        _system_prompt: &str,
        context: &RoundContext,
    ) -> Result<DecisionRecord, JudgeError> {
        Ok(self.decide(context))
    }
}

/// Compose the pipeline results into one decision record
pub fn assemble(
    context: &RoundContext,
    intent: Intent,
    validation: Validation,
    outcome: Option<RoundOutcome>,
    state_update: StateUpdate,
) -> DecisionRecord {
    let status = validation.status;

    let game_logic = status.is_valid().then(|| GameLogic {
        player1_move: context.player1_move,
        player2_move: intent.move_understood,
        round_winner: outcome.as_ref().map(|o| o.winner),
        round_explanation: outcome
            .as_ref()
            .map(|o| o.explanation.clone())
            .unwrap_or_else(|| "No opposing move supplied.".to_string()),
    });

    let player_message = match (&game_logic, status.is_valid()) {
        (Some(logic), true) if logic.round_winner.is_some() => {
            format!("Move accepted. {}", logic.round_explanation)
        }
        (_, true) => "Move accepted.".to_string(),
        (_, false) => validation.reason.clone(),
    };

    DecisionRecord {
        round_number: context.round_number,
        player2_raw_input: context.player2_raw_input.clone(),
        intent_understanding: IntentUnderstanding {
            move_understood: intent.move_understood,
            reasoning: intent.reasoning,
        },
        validation,
        game_logic,
        state_update,
        final_result: FinalResult {
            move_accepted: status.is_valid(),
            action: status.action(),
            player_message,
        },
    }
}
