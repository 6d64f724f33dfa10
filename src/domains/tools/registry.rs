//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of tool names the server accepts
//! - Name validation ahead of dispatch
//! - Direct dispatch for transports that bypass the rmcp router (HTTP)

use std::sync::Arc;
use tracing::warn;

use rmcp::model::{CallToolResult, JsonObject};

use super::ToolError;
use super::definitions::GetTranscriptTool;
use crate::domains::transcripts::TranscriptFetcher;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    fetcher: Arc<TranscriptFetcher>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(fetcher: Arc<TranscriptFetcher>) -> Self {
        Self { fetcher }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![GetTranscriptTool::NAME]
    }

    /// Fail with [`ToolError::NotFound`] unless `name` is a registered tool.
    pub fn ensure_known(name: &str) -> Result<(), ToolError> {
        if Self::tool_names().iter().any(|known| *known == name) {
            Ok(())
        } else {
            warn!("Unknown tool requested: {}", name);
            Err(ToolError::not_found(name))
        }
    }

    /// Dispatch a tool call to the appropriate handler.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        Self::ensure_known(name)?;

        match name {
            GetTranscriptTool::NAME => GetTranscriptTool::call(arguments, &self.fetcher).await,
            _ => Err(ToolError::not_found(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::transcripts::test_support::MockSource;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names, vec!["get_youtube_transcript"]);
    }

    #[test]
    fn test_ensure_known() {
        assert!(ToolRegistry::ensure_known("get_youtube_transcript").is_ok());
        assert!(matches!(
            ToolRegistry::ensure_known("bogus_tool"),
            Err(ToolError::NotFound(name)) if name == "bogus_tool"
        ));
    }

    #[test]
    fn test_registry_call_unknown() {
        let source = Arc::new(MockSource::with_texts(&["unused"]));
        let registry = ToolRegistry::new(Arc::new(TranscriptFetcher::new(source.clone())));

        let result = tokio_test::block_on(registry.call_tool("bogus_tool", Some(JsonObject::new())));

        assert!(matches!(result, Err(ToolError::NotFound(name)) if name == "bogus_tool"));
        assert_eq!(source.call_count(), 0);
    }

    #[test]
    fn test_registry_call_transcript() {
        let source = Arc::new(MockSource::with_texts(&["Hello", "world"]));
        let registry = ToolRegistry::new(Arc::new(TranscriptFetcher::new(source.clone())));
        let arguments = serde_json::json!({ "videoUrl": "https://youtu.be/dQw4w9WgXcQ" })
            .as_object()
            .cloned();

        let result =
            tokio_test::block_on(registry.call_tool("get_youtube_transcript", arguments)).unwrap();

        assert_eq!(result.content.len(), 1);
        assert_eq!(source.call_count(), 1);
    }
}
