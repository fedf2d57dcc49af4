//! Scripted completion client for testing.

use super::traits::{CompletionClient, JudgeError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// In-memory completion client that replays queued replies
#[derive(Clone, Default)]
pub struct MockCompletionClient {
    /// Queued outcomes, oldest first. `Err` simulates a backend failure.
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    /// Every (system prompt, user message) pair received
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply text
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(reply.into()));
    }

    /// Queue a backend failure
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script.lock().unwrap().push_back(Err(message.into()));
    }

    /// Get all requests seen so far (for testing)
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, JudgeError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_message.to_string()));

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(JudgeError::Backend(message)),
            None => Err(JudgeError::Backend("no scripted reply left".to_string())),
        }
    }
}
