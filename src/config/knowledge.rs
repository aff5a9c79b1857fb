use crate::errors::AgentError;
use log::debug;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

/// Reads and parses the knowledge base document. Called once per request on
/// purpose: the document is small, static config, and skipping a cache keeps
/// the handler free of shared state. The root must be a JSON object.
pub fn load_knowledge_base(path: &Path) -> Result<JsonValue, AgentError> {
    let file_content = fs::read_to_string(path).map_err(|source| {
        AgentError::KnowledgeBaseIo { path: path.to_path_buf(), source }
    })?;
    let knowledge_base: JsonValue = serde_json::from_str(&file_content).map_err(|source| {
        AgentError::KnowledgeBaseParse { path: path.to_path_buf(), source }
    })?;

    if !knowledge_base.is_object() {
        return Err(AgentError::KnowledgeBaseShape { path: path.to_path_buf() });
    }

    debug!(
        "Loaded knowledge base from '{}' ({} top-level sections)",
        path.display(),
        knowledge_base.as_object().map(|o| o.len()).unwrap_or(0)
    );
    Ok(knowledge_base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("kb-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_a_json_object_document() {
        let path = temp_file(r#"{"name": "Eduard Lorenz", "skills": ["Rust"]}"#);
        let kb = load_knowledge_base(&path).unwrap();
        assert_eq!(kb["name"], "Eduard Lorenz");
        assert_eq!(kb["skills"][0], "Rust");
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join(format!("kb-{}.json", uuid::Uuid::new_v4()));
        let err = load_knowledge_base(&path).unwrap_err();
        assert!(matches!(err, AgentError::KnowledgeBaseIo { .. }));
        assert!(err.is_knowledge_base());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let path = temp_file("{not json");
        let err = load_knowledge_base(&path).unwrap_err();
        assert!(matches!(err, AgentError::KnowledgeBaseParse { .. }));
        fs::remove_file(path).ok();
    }

    #[test]
    fn non_object_root_is_rejected() {
        let path = temp_file(r#"["just", "an", "array"]"#);
        let err = load_knowledge_base(&path).unwrap_err();
        assert!(matches!(err, AgentError::KnowledgeBaseShape { .. }));
        fs::remove_file(path).ok();
    }
}
