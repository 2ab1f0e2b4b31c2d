//! Scripted completion gateway for deterministic runs.

use crate::completion::domain::{
    CompletionOptions, CompletionResponse, ConversationLog, HealthReport, HealthStatus,
};
use crate::completion::ports::{CompletionError, CompletionGateway, CompletionResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

/// A request observed by [`ScriptedCompletionGateway`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Conversation sent with the request.
    pub log: ConversationLog,
    /// Options sent with the request.
    pub options: CompletionOptions,
}

/// In-memory gateway that replays queued replies in order.
///
/// Every call records its request. Once the queue is empty, calls fail with
/// [`CompletionError::ScriptExhausted`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedCompletionGateway {
    state: Arc<RwLock<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<CompletionResult<CompletionResponse>>,
    requests: Vec<RecordedRequest>,
}

fn poisoned(err: impl std::fmt::Display) -> CompletionError {
    CompletionError::transport(std::io::Error::other(err.to_string()))
}

impl ScriptedCompletionGateway {
    /// Creates a gateway with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when lock acquisition fails.
    pub fn push_reply(&self, reply: CompletionResult<CompletionResponse>) -> CompletionResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.replies.push_back(reply);
        Ok(())
    }

    /// Queues a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when lock acquisition fails.
    pub fn push_response(&self, response: CompletionResponse) -> CompletionResult<()> {
        self.push_reply(Ok(response))
    }

    /// Queues a response holding one text block.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when lock acquisition fails.
    pub fn push_text(&self, text: impl Into<String>) -> CompletionResult<()> {
        self.push_response(CompletionResponse::text(text))
    }

    /// Queues a failure.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when lock acquisition fails.
    pub fn push_error(&self, error: CompletionError) -> CompletionResult<()> {
        self.push_reply(Err(error))
    }

    /// Returns every request received so far.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when lock acquisition fails.
    pub fn requests(&self) -> CompletionResult<Vec<RecordedRequest>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.requests.clone())
    }

    /// Returns the number of queued replies.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when lock acquisition fails.
    pub fn remaining(&self) -> CompletionResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.replies.len())
    }
}

#[async_trait]
impl CompletionGateway for ScriptedCompletionGateway {
    async fn complete(
        &self,
        log: &ConversationLog,
        options: &CompletionOptions,
    ) -> CompletionResult<CompletionResponse> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.requests.push(RecordedRequest {
            log: log.clone(),
            options: options.clone(),
        });
        state
            .replies
            .pop_front()
            .unwrap_or(Err(CompletionError::ScriptExhausted))
    }

    async fn health_check(&self) -> HealthReport {
        match self.state.read() {
            Ok(state) => HealthReport {
                provider: "scripted".to_owned(),
                status: HealthStatus::Healthy,
                models: Vec::new(),
                message: Some(format!("{} scripted replies queued", state.replies.len())),
            },
            Err(err) => HealthReport {
                provider: "scripted".to_owned(),
                status: HealthStatus::Error,
                models: Vec::new(),
                message: Some(err.to_string()),
            },
        }
    }
}
