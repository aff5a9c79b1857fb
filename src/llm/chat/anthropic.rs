use async_trait::async_trait;
use log::{ debug, error };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE } };
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, CompletionResponse };
use crate::errors::AgentError;
use crate::llm::LlmConfig;
use crate::models::chat::{ ChatTurn, Role };

const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
}

#[derive(Deserialize)]
struct AnthropicContentBlock {
    text: String,
}

impl AnthropicChatClient {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        max_tokens: u32,
    ) -> Result<Self, AgentError> {
        let chat_model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&api_key)
                .map_err(|e| AgentError::Internal(format!("Invalid API key format: {}", e)))?,
        );

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            model: chat_model,
            base_url: api_url,
            max_tokens,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, AgentError> {
        Self::new(
            config.api_key.clone(),
            config.completion_model.clone(),
            config.base_url.clone(),
            config.max_tokens,
        )
    }

    fn to_wire(messages: &[ChatTurn]) -> Vec<AnthropicMessage> {
        messages
            .iter()
            .map(|turn| AnthropicMessage {
                role: match turn.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: turn.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl ChatClient for AnthropicChatClient {
    /// Single attempt, no retry: transient upstream failures surface directly
    /// so the chat client on the other end can resubmit.
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatTurn],
    ) -> Result<CompletionResponse, AgentError> {
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: Self::to_wire(messages),
        };

        debug!(
            "Sending completion request: model={}, messages={}",
            self.model,
            request.messages.len()
        );

        let response = self.http
            .post(format!("{}/v1/messages", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await?;
            error!("Anthropic API error (HTTP {}): {}", status, details);
            return Err(AgentError::Upstream { status: status.as_u16(), details });
        }

        let parsed: AnthropicResponse = response.json().await?;
        let reply = parsed.content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| {
                AgentError::Internal("Completion response contained no content blocks".to_string())
            })?;

        Ok(CompletionResponse { response: reply })
    }
}
