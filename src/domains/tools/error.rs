//! Tool-specific error types.

use rmcp::{ErrorData as McpError, model::ErrorCode};
use thiserror::Error;

use crate::domains::transcripts::TranscriptError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// A required argument was absent or null.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The transcript could not be produced.
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "missing argument" error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let message = err.to_string();
        match err {
            ToolError::NotFound(name) => McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                message,
                Some(serde_json::json!({ "tool": name })),
            ),
            ToolError::MissingArgument(_)
            | ToolError::InvalidArguments(_)
            | ToolError::Transcript(TranscriptError::InvalidInput(_)) => {
                McpError::invalid_params(message, None)
            }
            ToolError::Transcript(TranscriptError::Fetch { .. }) => {
                McpError::internal_error(message, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::transcripts::InvalidInputError;

    #[test]
    fn test_not_found_maps_to_method_not_found() {
        let err: McpError = ToolError::not_found("bogus_tool").into();
        assert_eq!(err.code, ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(err.message, "Unknown tool: bogus_tool");
        assert_eq!(err.data, Some(serde_json::json!({ "tool": "bogus_tool" })));
    }

    #[test]
    fn test_argument_errors_map_to_invalid_params() {
        let err: McpError = ToolError::missing_argument("videoUrl").into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Missing required argument: videoUrl");

        let err: McpError =
            ToolError::from(TranscriptError::InvalidInput(InvalidInputError::EmptyUrl)).into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "URL is required");
    }

    #[test]
    fn test_fetch_failure_keeps_message() {
        let err: McpError = ToolError::from(TranscriptError::Fetch {
            message: "Invalid YouTube URL".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Failed to get transcript: Invalid YouTube URL");
    }
}
