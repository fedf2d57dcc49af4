//! Round judges.
//!
//! A [`Judge`] owns the backend chosen at startup and the system
//! instruction. Backend failures are masked by the deterministic judge;
//! schema errors are returned to the caller.

mod deterministic;
mod external;
mod gemini;
pub mod mock;
mod traits;

pub use deterministic::{assemble, DeterministicBackend};
pub use external::{build_user_message, parse_decision, strip_code_fences, ExternalBackend};
pub use gemini::{extract_text, request_body, GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock::MockCompletionClient;
pub use traits::{CompletionClient, JudgeBackend, JudgeError};

use crate::protocol::{DecisionRecord, RoundContext};
use std::sync::Arc;
use tracing::{info, warn};

/// Which backend produced a record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionSource {
    Primary,
    Fallback,
}

/// Primary backend plus the deterministic fallback
#[derive(Clone)]
pub struct Judge {
    backend: Arc<dyn JudgeBackend>,
    fallback: DeterministicBackend,
    system_prompt: Arc<str>,
}

impl Judge {
    pub fn new(backend: Arc<dyn JudgeBackend>, system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            backend,
            fallback: DeterministicBackend::new(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Judge that never leaves the process
    pub fn deterministic(system_prompt: impl Into<Arc<str>>) -> Self {
        Self::new(Arc::new(DeterministicBackend::new()), system_prompt)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Adjudicate one round
    pub async fn adjudicate(&self, context: &RoundContext) -> Result<DecisionRecord, JudgeError> {
        self.adjudicate_traced(context).await.map(|(record, _)| record)
    }

    /// Adjudicate one round and report which backend answered
    pub async fn adjudicate_traced(
        &self,
        context: &RoundContext,
    ) -> Result<(DecisionRecord, DecisionSource), JudgeError> {
        let result = match self.backend.adjudicate(&self.system_prompt, context).await {
            Ok(record) => Ok((record, DecisionSource::Primary)),
            Err(JudgeError::Backend(reason)) => {
                warn!(
                    backend = self.backend.name(),
                    %reason,
                    "Judge backend failed, using deterministic judge"
                );
                Ok((self.fallback.decide(context), DecisionSource::Fallback))
            }
            Err(e) => Err(e),
        };

        if let Ok((record, source)) = &result {
            info!(
                round = record.round_number,
                status = %record.status(),
                ?source,
                "Round adjudicated"
            );
        }
        result
    }
}
