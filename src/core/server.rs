//! MCP Server implementation.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! The ToolRouter is built in `domains/tools/router.rs`; `call_tool` checks
//! the requested name against the `ToolRegistry` before routing so that an
//! unknown tool yields a method-not-found error.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};
use crate::domains::transcripts::{TranscriptFetcher, TranscriptSource, YoutubeTranscriptClient};

const INSTRUCTIONS: &str = "This server fetches YouTube video transcripts. \
     Call the get_youtube_transcript tool with a videoUrl to receive the caption text of the video.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It is cheap to
/// clone; TCP and HTTP transports hand a clone to every connection.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Direct dispatch for the HTTP transport.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server that fetches transcripts from YouTube.
    pub fn new(config: Config) -> Result<Self> {
        let client = YoutubeTranscriptClient::new(&config.transcript)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create a new MCP server backed by the given transcript source.
    pub fn with_source(config: Config, source: Arc<dyn TranscriptSource>) -> Self {
        let config = Arc::new(config);
        let fetcher = Arc::new(TranscriptFetcher::new(source));

        info!("Transcript source: {}", fetcher.source_name());

        Self {
            tool_router: build_tool_router::<Self>(fetcher.clone()),
            registry: Arc::new(ToolRegistry::new(fetcher)),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Instructions advertised to clients.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// All tool descriptors.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name without going through an rmcp service
    /// (used by the HTTP transport).
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if let Err(e) = ToolRegistry::ensure_known(&request.name) {
            error!("Rejected tool call: {}", e);
            return Err(e.into());
        }

        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router
            .call(tcc)
            .await
            .inspect_err(|e| error!("Tool call failed ({}): {}", e.code.0, e.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::transcripts::test_support::MockSource;

    fn test_server(source: Arc<MockSource>) -> McpServer {
        McpServer::with_source(Config::default(), source)
    }

    #[test]
    fn test_server_identity() {
        let server = test_server(Arc::new(MockSource::with_texts(&[])));
        assert_eq!(server.name(), "youtube-transcript");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let server = test_server(Arc::new(MockSource::with_texts(&[])));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "youtube-transcript");
        assert!(info.instructions.unwrap().contains("get_youtube_transcript"));
    }

    #[test]
    fn test_tools_single_descriptor() {
        let server = test_server(Arc::new(MockSource::with_texts(&[])));
        for _ in 0..3 {
            let tools = server.tools();
            assert_eq!(tools.len(), 1);
            assert_eq!(tools[0].name.as_ref(), "get_youtube_transcript");
            assert_eq!(
                tools[0].input_schema["properties"]["videoUrl"]["type"],
                "string"
            );
        }
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let source = Arc::new(MockSource::with_texts(&["unused"]));
        let server = test_server(source.clone());

        let err = server
            .dispatch("bogus_tool", Some(JsonObject::new()))
            .await
            .unwrap_err();

        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code, ErrorCode::METHOD_NOT_FOUND);
        assert!(mcp_err.message.contains("bogus_tool"));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_transcript() {
        let source = Arc::new(MockSource::with_texts(&["Hello", "world"]));
        let server = test_server(source.clone());
        let arguments = serde_json::json!({ "videoUrl": "https://youtu.be/dQw4w9WgXcQ" })
            .as_object()
            .cloned();

        let result = server
            .dispatch("get_youtube_transcript", arguments)
            .await
            .unwrap();

        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "Hello world"),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_invalid_url_message() {
        let source = Arc::new(MockSource::with_texts(&["unused"]));
        let server = test_server(source);
        let arguments = serde_json::json!({ "videoUrl": "not a url" })
            .as_object()
            .cloned();

        let err = server
            .dispatch("get_youtube_transcript", arguments)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to get transcript: Invalid YouTube URL");
    }

    async fn write_line<W: tokio::io::AsyncWrite + Unpin>(writer: &mut W, message: serde_json::Value) {
        use tokio::io::AsyncWriteExt;

        let mut line = message.to_string();
        line.push('\n');
        writer.write_all(line.as_bytes()).await.unwrap();
        writer.flush().await.unwrap();
    }

    fn call(id: u64, name: &str, arguments: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
    }

    #[tokio::test]
    async fn test_rmcp_session_over_duplex() {
        use rmcp::ServiceExt;
        use std::collections::HashMap;
        use std::time::Duration;
        use tokio::io::{AsyncBufReadExt, BufReader};

        let source = Arc::new(MockSource::with_texts(&["Hello", "world"]));
        let server = test_server(source.clone());

        let (server_io, client_io) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            if let Ok(running) = server.serve(server_io).await {
                let _ = running.waiting().await;
            }
        });

        let (read_half, mut write_half) = tokio::io::split(client_io);
        let mut lines = BufReader::new(read_half).lines();

        write_line(
            &mut write_half,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "test-client", "version": "0.0.0" }
                }
            }),
        )
        .await;

        let init: serde_json::Value = tokio::time::timeout(Duration::from_secs(5), lines.next_line())
            .await
            .unwrap()
            .unwrap()
            .map(|line| serde_json::from_str(&line).unwrap())
            .unwrap();
        assert_eq!(init["id"], 1);
        assert_eq!(init["result"]["serverInfo"]["name"], "youtube-transcript");

        write_line(
            &mut write_half,
            serde_json::json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )
        .await;

        let url = serde_json::json!({ "videoUrl": "https://youtu.be/dQw4w9WgXcQ" });
        for message in [
            call(2, "bogus_tool", serde_json::json!({})),
            call(3, "get_youtube_transcript", url),
            call(4, "get_youtube_transcript", serde_json::json!({})),
            call(5, "get_youtube_transcript", serde_json::json!({ "videoUrl": "nope" })),
            serde_json::json!({ "jsonrpc": "2.0", "id": 6, "method": "tools/list" }),
        ] {
            write_line(&mut write_half, message).await;
        }

        // Calls may complete out of order; collect replies by id.
        let mut replies: HashMap<u64, serde_json::Value> = HashMap::new();
        while replies.len() < 5 {
            let line = tokio::time::timeout(Duration::from_secs(5), lines.next_line())
                .await
                .expect("timed out waiting for a reply")
                .unwrap()
                .expect("server closed the stream");
            let reply: serde_json::Value = serde_json::from_str(&line).unwrap();
            if let Some(id) = reply["id"].as_u64() {
                replies.insert(id, reply);
            }
        }

        let unknown = &replies[&2]["error"];
        assert_eq!(unknown["code"], -32601);
        assert_eq!(unknown["data"]["tool"], "bogus_tool");

        let ok = &replies[&3]["result"];
        assert_eq!(ok["content"][0]["type"], "text");
        assert_eq!(ok["content"][0]["text"], "Hello world");

        let missing = &replies[&4]["error"];
        assert_eq!(missing["code"], -32602);
        assert_eq!(missing["message"], "Missing required argument: videoUrl");

        let bad_url = &replies[&5]["error"];
        assert_eq!(bad_url["code"], -32603);
        assert_eq!(
            bad_url["message"],
            "Failed to get transcript: Invalid YouTube URL"
        );

        let tools = replies[&6]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "get_youtube_transcript");

        // Only the valid call reached the source.
        assert_eq!(source.call_count(), 1);
    }
}
