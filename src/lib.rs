//! YouTube Transcript MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a single
//! tool, `get_youtube_transcript`, which returns the caption text of a YouTube
//! video.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler, and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The MCP tool definition, routing, and dispatch
//!   - **transcripts**: Video id extraction and transcript retrieval
//!
//! # Example
//!
//! ```rust,no_run
//! use youtube_transcript_mcp::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
pub use domains::transcripts::{TranscriptFetcher, VideoId, extract_video_id};
