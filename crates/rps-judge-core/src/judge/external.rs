//! Judge backed by a language model.
//!
//! The round context goes out as pretty-printed JSON next to the system
//! instruction. The reply must be a decision record, optionally wrapped in
//! a markdown code fence. Anything else is a schema error.

use super::traits::{CompletionClient, JudgeBackend, JudgeError};
use crate::protocol::{DecisionRecord, RoundContext, SchemaError};
use async_trait::async_trait;
use tracing::{debug, error, warn};

/// Judge that asks a completion service for the decision
pub struct ExternalBackend<C> {
    client: C,
}

impl<C: CompletionClient> ExternalBackend<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

/// Build the user message carrying the round context
pub fn build_user_message(context: &RoundContext) -> Result<String, JudgeError> {
    let context_json = serde_json::to_string_pretty(context)
        .map_err(|e| JudgeError::Backend(format!("Failed to encode round context: {e}")))?;

    Ok(format!(
        "\nPlease evaluate this round:\n\n{context_json}\n\n\
         Remember to output VALID JSON with the structure defined in your instructions.\n"
    ))
}

/// Remove a surrounding ```json / ``` fence and whitespace
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Strictly parse a raw model reply into a decision record
pub fn parse_decision(reply: &str) -> Result<DecisionRecord, SchemaError> {
    DecisionRecord::from_json(strip_code_fences(reply))
}

#[async_trait]
impl<C: CompletionClient> JudgeBackend for ExternalBackend<C> {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn adjudicate(
        &self,
        system_prompt: &str,
        context: &RoundContext,
    ) -> Result<DecisionRecord, JudgeError> {
        let user_message = build_user_message(context)?;
        debug!(round = context.round_number, "Sending round to external judge");

        let reply = self.client.complete(system_prompt, &user_message).await?;
        debug!(reply = %reply, "External judge replied");

        let record = parse_decision(&reply).map_err(|e| {
            error!(error = %e, "External judge reply is not a valid decision record");
            e
        })?;

        if record.round_number != context.round_number {
            warn!(
                expected = context.round_number,
                got = record.round_number,
                "External judge numbered the round differently"
            );
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::MoveCategory;
    use crate::judge::mock::MockCompletionClient;
    use crate::judge::DeterministicBackend;
    use crate::session::ResourceState;

    fn context() -> RoundContext {
        RoundContext::new(1, Some(MoveCategory::Rock), "paper", ResourceState::default())
    }

    fn reference_json() -> String {
        serde_json::to_string(&DeterministicBackend::new().decide(&context())).unwrap()
    }

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }

    #[test]
    fn test_user_message_embeds_context() {
        let message = build_user_message(&context()).unwrap();
        assert!(message.contains("Please evaluate this round:"));
        assert!(message.contains("\"player2_move\": \"paper\""));
        assert!(message.contains("\"player1_move\": \"rock\""));
        assert!(message.contains("Remember to output VALID JSON"));
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = format!("```json\n{}\n```", reference_json());
        let record = parse_decision(&reply).unwrap();
        assert_eq!(record.intent_understanding.move_understood, Some(MoveCategory::Paper));
    }

    #[test]
    fn test_parse_malformed_reply() {
        assert!(matches!(
            parse_decision("```json\n{not json\n```"),
            Err(SchemaError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_adjudicate_uses_client_reply() {
        let client = MockCompletionClient::new();
        client.push_reply(format!("```json\n{}\n```", reference_json()));
        let backend = ExternalBackend::new(client);

        let record = backend.adjudicate("be a judge", &context()).await.unwrap();
        assert!(record.is_accepted());

        let calls = backend.client().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "be a judge");
        assert!(calls[0].1.contains("\"round_number\": 1"));
    }

    #[tokio::test]
    async fn test_adjudicate_propagates_schema_error() {
        let client = MockCompletionClient::new();
        client.push_reply("I think you won!");
        let backend = ExternalBackend::new(client);

        let result = backend.adjudicate("be a judge", &context()).await;
        assert!(matches!(result, Err(JudgeError::Schema(_))));
    }

    #[tokio::test]
    async fn test_adjudicate_propagates_backend_error() {
        let client = MockCompletionClient::new();
        client.push_failure("quota exceeded");
        let backend = ExternalBackend::new(client);

        let result = backend.adjudicate("be a judge", &context()).await;
        assert!(matches!(result, Err(JudgeError::Backend(_))));
    }
}
