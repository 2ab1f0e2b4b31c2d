//! Ollama chat API adapter.

use crate::completion::domain::{
    CompletionOptions, CompletionResponse, ContentBlock, ConversationLog, HealthReport,
    HealthStatus, Usage,
};
use crate::completion::ports::{CompletionError, CompletionGateway, CompletionResult};
use crate::config::Provider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const START_HINT: &str = "Is Ollama running? Start it with: ollama serve";

/// Gateway for a local Ollama server.
///
/// Ollama has no tool protocol, so tool blocks are flattened to text.
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaGateway {
    /// Creates a gateway for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a gateway reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let raw: String = base_url.into();
        Self {
            client,
            base_url: raw.trim_end_matches('/').to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OllamaChatResponse {
    message: OllamaResponseMessage,
    #[serde(default)]
    prompt_eval_count: u64,
    #[serde(default)]
    eval_count: u64,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

/// Converts the log into an Ollama chat request.
///
/// The system prompt becomes a leading `system` message.
pub(crate) fn build_chat_request<'a>(
    log: &ConversationLog,
    options: &'a CompletionOptions,
) -> OllamaChatRequest<'a> {
    let system = options.system_prompt.iter().map(|prompt| OllamaMessage {
        role: "system",
        content: prompt.clone(),
    });
    let turns = log.entries().iter().map(|entry| OllamaMessage {
        role: entry.role.as_str(),
        content: flatten_blocks(&entry.content),
    });
    OllamaChatRequest {
        model: &options.model,
        messages: system.chain(turns).collect(),
        stream: false,
        options: OllamaOptions {
            temperature: options.temperature,
            num_predict: options.max_tokens,
        },
    }
}

/// Converts an Ollama chat response to the canonical shape.
pub(crate) fn into_canonical(response: OllamaChatResponse) -> CompletionResponse {
    CompletionResponse {
        content: vec![ContentBlock::text(response.message.content)],
        usage: Usage {
            input_tokens: response.prompt_eval_count,
            output_tokens: response.eval_count,
        },
    }
}

fn flatten_blocks(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            ContentBlock::Text { text } => text.clone(),
            ContentBlock::ToolUse { id, name, input } => {
                format!("[tool_use {name} id={id}] {input}")
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => {
                let label = if *is_error { "tool_error" } else { "tool_result" };
                format!("[{label} id={tool_use_id}]\n{content}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl CompletionGateway for OllamaGateway {
    async fn complete(
        &self,
        log: &ConversationLog,
        options: &CompletionOptions,
    ) -> CompletionResult<CompletionResponse> {
        let url = format!("{}/api/chat", self.base_url);
        let body = build_chat_request(log, options);
        debug!(model = %options.model, turns = log.len(), "sending Ollama chat request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(CompletionError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Ollama API error");
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Decode(err.to_string()))?;
        Ok(into_canonical(parsed))
    }

    async fn health_check(&self) -> HealthReport {
        let url = format!("{}/api/tags", self.base_url);
        let outcome = async {
            let response = self.client.get(&url).send().await?.error_for_status()?;
            response.json::<OllamaTags>().await
        }
        .await;

        match outcome {
            Ok(tags) => HealthReport {
                provider: Provider::Ollama.to_string(),
                status: HealthStatus::Healthy,
                models: tags.models.into_iter().map(|model| model.name).collect(),
                message: None,
            },
            Err(err) => HealthReport {
                provider: Provider::Ollama.to_string(),
                status: HealthStatus::Error,
                models: Vec::new(),
                message: Some(format!("{err}. {START_HINT}")),
            },
        }
    }
}
