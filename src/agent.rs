use crate::cli::Args;
use crate::config::knowledge::load_knowledge_base;
use crate::errors::AgentError;
use crate::llm::LlmConfig;
use crate::llm::chat::{ new_client as new_chat_client, ChatClient };
use crate::models::chat::{ ChatRequest, ChatResponse, ChatTurn };

use log::{ info, warn };
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Stateless request pipeline: validate, load the knowledge base, compose the
/// system prompt, append the new user turn, call the completion service, and
/// shape the reply. Holds only read-only configuration, so handlers share it
/// behind a plain `Arc` with no lock.
pub struct ProfileAgent {
    chat_client: Option<Arc<dyn ChatClient>>,
    knowledge_base_path: PathBuf,
    profile_name: String,
}

impl ProfileAgent {
    pub fn new(args: &Args) -> Result<Self, AgentError> {
        let chat_client = if args.anthropic_api_key.is_empty() {
            warn!("ANTHROPIC_API_KEY is not set; chat requests will fail with a 500");
            None
        } else {
            let config = LlmConfig {
                api_key: args.anthropic_api_key.clone(),
                completion_model: args.chat_model.clone(),
                base_url: args.chat_base_url.clone(),
                max_tokens: args.max_tokens,
            };
            Some(new_chat_client(&config)?)
        };

        Ok(Self::with_client(
            chat_client,
            PathBuf::from(&args.knowledge_base_path),
            args.profile_name.clone(),
        ))
    }

    /// Direct constructor: the agent is a pure function of its client,
    /// knowledge-base location, and persona. Tests use this to swap in a
    /// completion double.
    pub fn with_client(
        chat_client: Option<Arc<dyn ChatClient>>,
        knowledge_base_path: PathBuf,
        profile_name: String,
    ) -> Self {
        Self { chat_client, knowledge_base_path, profile_name }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError> {
        if request.message.trim().is_empty() {
            return Err(AgentError::Validation("Message is required".to_string()));
        }

        let chat_client = self.chat_client.as_ref().ok_or(AgentError::MissingApiKey)?;

        let knowledge_base = load_knowledge_base(&self.knowledge_base_path)?;
        let system = compose_system_prompt(&knowledge_base, &request.language, &self.profile_name);
        let mut messages = assemble_messages(&request.conversation_history, &request.message);

        let request_id = Uuid::new_v4();
        info!(
            "[{}] chat request: language={}, history_turns={}",
            request_id,
            request.language,
            request.conversation_history.len()
        );

        let completion = chat_client.complete(&system, &messages).await?;
        info!("[{}] completion received ({} chars)", request_id, completion.response.len());

        // The outbound sequence already ends with the new user turn, so the
        // authoritative history is that sequence plus the assistant's reply.
        messages.push(ChatTurn::assistant(completion.response.clone()));
        Ok(ChatResponse {
            response: completion.response,
            conversation_history: messages,
        })
    }
}

/// Builds the system instruction: persona and scope, the full serialized
/// knowledge base, and the language directive stated up front and repeated as
/// the final line. The language code is uppercased but deliberately not
/// validated; picking a sensible response for an unknown code is delegated to
/// the model.
pub fn compose_system_prompt(
    knowledge_base: &JsonValue,
    language: &str,
    profile_name: &str,
) -> String {
    let language = language.to_uppercase();
    let serialized = serde_json::to_string_pretty(knowledge_base)
        .unwrap_or_else(|_| knowledge_base.to_string());

    format!(
        "You are {profile_name}'s interactive CV assistant. You have access to \
{profile_name}'s complete professional profile.\n\n\
LANGUAGE: Respond in {language} language.\n\n\
KNOWLEDGE BASE:\n{serialized}\n\n\
INSTRUCTIONS:\n\
- Answer questions about {profile_name}'s experience, skills, portfolio, and background\n\
- Be professional yet conversational\n\
- Use specific examples from the knowledge base\n\
- If asked about something not in the knowledge base, politely say you don't have that information\n\
- Always respond in {language} language"
    )
}

/// Prior turns pass through in order, then the new user turn goes last.
pub fn assemble_messages(history: &[ChatTurn], message: &str) -> Vec<ChatTurn> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.extend_from_slice(history);
    messages.push(ChatTurn::user(message));
    messages
}
