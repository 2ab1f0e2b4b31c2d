//! Anthropic Messages API adapter.

use crate::completion::domain::{
    CompletionOptions, CompletionResponse, ContentBlock, ConversationLog, HealthReport,
    HealthStatus, ToolDefinition, Usage,
};
use crate::completion::ports::{CompletionError, CompletionGateway, CompletionResult};
use crate::config::Provider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

const API_VERSION: &str = "2023-06-01";

/// Gateway for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AnthropicGateway {
    /// Creates a gateway for `base_url` authenticated with `api_key`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Creates a gateway reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let raw: String = base_url.into();
        Self {
            client,
            base_url: raw.trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolDefinition],
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a [ContentBlock],
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    content: Vec<WireBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    #[serde(other)]
    Other,
}

fn no_tools(tools: &&[ToolDefinition]) -> bool {
    tools.is_empty()
}

/// Converts the log into a Messages API request body.
pub(crate) fn build_messages_request<'a>(
    log: &'a ConversationLog,
    options: &'a CompletionOptions,
) -> MessagesRequest<'a> {
    MessagesRequest {
        model: &options.model,
        max_tokens: options.max_tokens,
        temperature: options.temperature,
        messages: log
            .entries()
            .iter()
            .map(|entry| WireMessage {
                role: entry.role.as_str(),
                content: &entry.content,
            })
            .collect(),
        system: options.system_prompt.as_deref(),
        tools: &options.tools,
    }
}

/// Converts a Messages API response to the canonical shape.
///
/// Block types without a canonical counterpart are dropped.
pub(crate) fn into_canonical(response: MessagesResponse) -> CompletionResponse {
    let content = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            WireBlock::Text { text } => Some(ContentBlock::Text { text }),
            WireBlock::ToolUse { id, name, input } => {
                Some(ContentBlock::ToolUse { id, name, input })
            }
            WireBlock::Other => None,
        })
        .collect();
    CompletionResponse {
        content,
        usage: response.usage,
    }
}

#[async_trait]
impl CompletionGateway for AnthropicGateway {
    async fn complete(
        &self,
        log: &ConversationLog,
        options: &CompletionOptions,
    ) -> CompletionResult<CompletionResponse> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = build_messages_request(log, options);
        debug!(
            model = %options.model,
            turns = log.len(),
            tools = options.tools.len(),
            "sending Anthropic messages request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(CompletionError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Anthropic API error");
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Decode(err.to_string()))?;
        Ok(into_canonical(parsed))
    }

    async fn health_check(&self) -> HealthReport {
        HealthReport {
            provider: Provider::Anthropic.to_string(),
            status: HealthStatus::Healthy,
            models: Vec::new(),
            message: Some("API key configured; reachability is not checked".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn request_carries_system_blocks_and_tools() {
        let mut log = ConversationLog::new();
        log.push_user_text("Task: write tests");
        log.push_assistant(vec![ContentBlock::tool_use(
            "toolu_1",
            "list_files",
            json!({ "directory": "src" }),
        )]);
        log.push_user_blocks(vec![ContentBlock::tool_error("toolu_1", "Error: missing")]);
        let options = CompletionOptions::new("claude-sonnet", 2048, 0.7)
            .with_system_prompt("You are the tester agent.")
            .with_tools(vec![ToolDefinition {
                name: "list_files".to_owned(),
                description: "List files".to_owned(),
                input_schema: json!({ "type": "object" }),
            }]);

        let body = serde_json::to_value(build_messages_request(&log, &options))
            .expect("request should serialise");

        assert_eq!(body["system"], json!("You are the tester agent."));
        assert_eq!(body["max_tokens"], json!(2048));
        assert_eq!(body["tools"][0]["name"], json!("list_files"));
        assert_eq!(
            body["messages"][1]["content"][0],
            json!({ "type": "tool_use", "id": "toolu_1", "name": "list_files", "input": { "directory": "src" } })
        );
        assert_eq!(
            body["messages"][2]["content"][0],
            json!({ "type": "tool_result", "tool_use_id": "toolu_1", "content": "Error: missing", "is_error": true })
        );
    }

    #[rstest]
    fn request_omits_empty_tools_and_missing_system() {
        let mut log = ConversationLog::new();
        log.push_user_text("hi");
        let options = CompletionOptions::new("claude-sonnet", 16, 0.0);

        let body = serde_json::to_value(build_messages_request(&log, &options))
            .expect("request should serialise");

        assert!(body.get("tools").is_none());
        assert!(body.get("system").is_none());
        assert_eq!(
            body["messages"],
            json!([{ "role": "user", "content": [{ "type": "text", "text": "hi" }] }])
        );
    }

    #[rstest]
    fn response_keeps_text_and_tool_use_in_order() {
        let raw: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "Writing the file." },
                { "type": "tool_use", "id": "toolu_2", "name": "write_file",
                  "input": { "file_path": "a.txt", "content": "x" } }
            ],
            "usage": { "input_tokens": 30, "output_tokens": 9 }
        }))
        .expect("response should decode");

        let response = into_canonical(raw);

        assert_eq!(response.content.len(), 2);
        assert_eq!(response.text_content(), "Writing the file.");
        assert!(response.has_tool_use());
        assert_eq!(
            response.usage,
            Usage {
                input_tokens: 30,
                output_tokens: 9
            }
        );
    }
}
