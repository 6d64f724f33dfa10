//! YouTube transcript tool.
//!
//! Returns the caption text of a YouTube video as a single text content item.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domains::tools::ToolError;
use crate::domains::transcripts::TranscriptFetcher;

/// Name of the single tool argument.
pub const VIDEO_URL_ARG: &str = "videoUrl";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the transcript tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTranscriptParams {
    /// URL of the YouTube video.
    #[serde(rename = "videoUrl")]
    #[schemars(description = "YouTube video URL (watch, youtu.be, embed, or /v/ form)")]
    pub video_url: String,
}

impl GetTranscriptParams {
    /// Parse tool arguments.
    ///
    /// An absent or null `videoUrl` is reported as a missing argument rather
    /// than being passed on as text.
    pub fn from_arguments(arguments: Option<JsonObject>) -> Result<Self, ToolError> {
        let arguments = arguments.unwrap_or_default();

        if arguments.get(VIDEO_URL_ARG).is_none_or(|v| v.is_null()) {
            return Err(ToolError::missing_argument(VIDEO_URL_ARG));
        }

        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// YouTube Transcript Tool implementation.
#[derive(Debug, Clone)]
pub struct GetTranscriptTool;

impl GetTranscriptTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_youtube_transcript";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Extract the transcript of a YouTube video. \
         Accepts any common YouTube URL form (youtube.com/watch?v=..., youtu.be/..., /embed/..., /v/...) \
         and returns the caption text as a single block of plain text.";

    /// Fetch the transcript and wrap it as one text content item.
    pub async fn execute(
        params: &GetTranscriptParams,
        fetcher: &TranscriptFetcher,
    ) -> Result<CallToolResult, ToolError> {
        info!("Transcript tool called for URL: {}", params.video_url);

        let text = fetcher.fetch_transcript(&params.video_url).await?;

        info!("Returning transcript ({} chars)", text.chars().count());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Parse raw arguments and execute.
    pub async fn call(
        arguments: Option<JsonObject>,
        fetcher: &TranscriptFetcher,
    ) -> Result<CallToolResult, ToolError> {
        let params = GetTranscriptParams::from_arguments(arguments).inspect_err(|e| {
            warn!("Rejected arguments for {}: {}", Self::NAME, e);
        })?;

        Self::execute(&params, fetcher).await
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetTranscriptParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(fetcher: Arc<TranscriptFetcher>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let fetcher = fetcher.clone();
            async move { Self::call(args, &fetcher).await.map_err(McpError::from) }.boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::transcripts::test_support::MockSource;
    use rmcp::model::RawContent;

    fn args(value: serde_json::Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_params_from_arguments() {
        let params = GetTranscriptParams::from_arguments(args(serde_json::json!({
            "videoUrl": "https://youtu.be/dQw4w9WgXcQ"
        })))
        .unwrap();
        assert_eq!(params.video_url, "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn test_missing_video_url() {
        for arguments in [
            None,
            args(serde_json::json!({})),
            args(serde_json::json!({ "videoUrl": null })),
        ] {
            let err = GetTranscriptParams::from_arguments(arguments).unwrap_err();
            assert!(matches!(err, ToolError::MissingArgument(ref name) if name == VIDEO_URL_ARG));
        }
    }

    #[test]
    fn test_non_string_video_url() {
        let err = GetTranscriptParams::from_arguments(args(serde_json::json!({ "videoUrl": 42 })))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_schema_requires_video_url() {
        let tool = GetTranscriptTool::to_tool();
        assert_eq!(tool.name, GetTranscriptTool::NAME);

        let schema = &tool.input_schema;
        assert_eq!(schema["properties"]["videoUrl"]["type"], "string");
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required, &vec![serde_json::json!("videoUrl")]);
    }

    #[tokio::test]
    async fn test_call_returns_single_text_item() {
        let source = Arc::new(MockSource::with_texts(&["Hello", "world"]));
        let fetcher = TranscriptFetcher::new(source.clone());

        let result = GetTranscriptTool::call(
            args(serde_json::json!({
                "videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s"
            })),
            &fetcher,
        )
        .await
        .unwrap();

        assert_eq!(result.content.len(), 1);
        assert_eq!(text_of(&result), "Hello world");
        assert_eq!(result.is_error, Some(false));
        assert_eq!(*source.calls.lock().unwrap(), vec!["dQw4w9WgXcQ"]);
    }

    #[tokio::test]
    async fn test_call_with_bad_url() {
        let source = Arc::new(MockSource::with_texts(&["unused"]));
        let fetcher = TranscriptFetcher::new(source.clone());

        let err = GetTranscriptTool::call(
            args(serde_json::json!({ "videoUrl": "https://example.com" })),
            &fetcher,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Failed to get transcript: Invalid YouTube URL");
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_call_without_argument_skips_fetch() {
        let source = Arc::new(MockSource::with_texts(&["unused"]));
        let fetcher = TranscriptFetcher::new(source.clone());

        let err = GetTranscriptTool::call(None, &fetcher).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(_)));
        assert_eq!(source.call_count(), 0);
    }
}
