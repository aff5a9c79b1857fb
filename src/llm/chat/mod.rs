pub mod anthropic;

use crate::errors::AgentError;
use crate::models::chat::ChatTurn;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use self::anthropic::AnthropicChatClient;
use super::LlmConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// Capability boundary around the completion service: given a system
/// instruction and an ordered message sequence, return the reply text or a
/// structured failure. Object-safe so handlers can hold an `Arc<dyn
/// ChatClient>` and tests can swap in a double.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatTurn],
    ) -> Result<CompletionResponse, AgentError>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, AgentError> {
    let client = AnthropicChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
