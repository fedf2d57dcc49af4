//! Judge backend trait definition.

use crate::protocol::{DecisionRecord, RoundContext, SchemaError};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from judge operations
#[derive(Debug, Error)]
pub enum JudgeError {
    /// The backend could not be reached or did not answer usefully.
    /// Recovered by falling back to the deterministic judge.
    #[error("Judge backend failed: {0}")]
    Backend(String),

    /// The backend answered, but not with a valid decision record.
    /// Fatal for the round.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The caller supplied a bomb for player 1 after it was spent
    #[error("Player 1 already used their bomb this match")]
    Player1BombSpent,
}

/// Trait for anything that can adjudicate a round
///
/// Implementations:
/// - `DeterministicBackend`, the local rule pipeline
/// - `ExternalBackend`, a language model behind a `CompletionClient`
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Produce the decision record for one round
    async fn adjudicate(
        &self,
        system_prompt: &str,
        context: &RoundContext,
    ) -> Result<DecisionRecord, JudgeError>;
}

/// Text completion service used by the external judge
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a system instruction plus user message, return the raw reply text
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, JudgeError>;
}
