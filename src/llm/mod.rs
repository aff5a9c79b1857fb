pub mod chat;

/// Connection settings for the completion provider, resolved from CLI/env in
/// `cli::Args` and handed to the client constructor.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: u32,
}
