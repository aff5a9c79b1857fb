use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP API binds to
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:3000")]
    pub server_addr: String,

    // --- Completion Provider Args ---
    /// API key for the Anthropic Messages API. Leaving it empty does not stop
    /// the process; chat requests fail with a 500 until it is configured.
    #[arg(long, env = "ANTHROPIC_API_KEY", default_value = "")]
    pub anthropic_api_key: String,

    /// Model name for chat completion
    #[arg(long, env = "CHAT_MODEL")]
    pub chat_model: Option<String>,

    /// Base URL for the completion API (e.g., https://api.anthropic.com)
    #[arg(long, env = "CHAT_BASE_URL")]
    pub chat_base_url: Option<String>,

    /// Maximum output token budget per completion
    #[arg(long, env = "MAX_TOKENS", default_value = "1024")]
    pub max_tokens: u32,

    // --- Knowledge Base Args ---
    /// Path to the knowledge base document, relative to the deployment root
    #[arg(long, env = "KNOWLEDGE_BASE_PATH", default_value = "data/knowledge-base.json")]
    pub knowledge_base_path: String,

    /// Name of the person the profile describes, used in the assistant persona
    #[arg(long, env = "PROFILE_NAME", default_value = "the profile owner")]
    pub profile_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ANTHROPIC_API_KEY is deliberately not asserted here: clap reads the
    // real environment even under parse_from, and the key may be present on a
    // developer machine.
    #[test]
    fn defaults_cover_a_runnable_local_setup() {
        let args = Args::parse_from(["profile-agent"]);
        assert_eq!(args.server_addr, "0.0.0.0:3000");
        assert_eq!(args.knowledge_base_path, "data/knowledge-base.json");
        assert_eq!(args.max_tokens, 1024);
        assert_eq!(args.profile_name, "the profile owner");
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "profile-agent",
            "--server-addr",
            "127.0.0.1:9000",
            "--chat-model",
            "claude-3-sonnet-20240229",
            "--max-tokens",
            "512",
        ]);
        assert_eq!(args.server_addr, "127.0.0.1:9000");
        assert_eq!(args.chat_model.as_deref(), Some("claude-3-sonnet-20240229"));
        assert_eq!(args.max_tokens, 512);
    }
}
