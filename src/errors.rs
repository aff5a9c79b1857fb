use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while answering a chat request. Variants map
/// 1:1 onto the HTTP envelopes produced in `server::api`.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Validation(String),

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Failed to read knowledge base at {path}: {source}")]
    KnowledgeBaseIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Knowledge base at {path} is not valid JSON: {source}")]
    KnowledgeBaseParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Knowledge base at {path} must be a JSON object")]
    KnowledgeBaseShape { path: PathBuf },

    /// Non-success status from the completion service. The status and raw
    /// body are forwarded to the caller verbatim, single attempt, no retry.
    #[error("AI service returned HTTP {status}: {details}")]
    Upstream { status: u16, details: String },

    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),
}

impl AgentError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AgentError::Validation(_))
    }

    pub fn is_knowledge_base(&self) -> bool {
        matches!(
            self,
            AgentError::KnowledgeBaseIo { .. }
                | AgentError::KnowledgeBaseParse { .. }
                | AgentError::KnowledgeBaseShape { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_displays_reason_only() {
        let err = AgentError::Validation("Message is required".into());
        assert_eq!(err.to_string(), "Message is required");
        assert!(err.is_validation());
    }

    #[test]
    fn knowledge_base_classifier_covers_all_loader_failures() {
        let io = AgentError::KnowledgeBaseIo {
            path: PathBuf::from("data/knowledge-base.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let shape = AgentError::KnowledgeBaseShape {
            path: PathBuf::from("data/knowledge-base.json"),
        };
        assert!(io.is_knowledge_base());
        assert!(shape.is_knowledge_base());
        assert!(!AgentError::MissingApiKey.is_knowledge_base());
    }
}
